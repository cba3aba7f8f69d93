use crate::event::{AppEvent, Event, EventHandler};
use crate::input::{KeyChange, PaddleKeys};
use crate::surface::TerminalSurface;
use pong_core::{Config, Difficulty, Game, ManualScheduler, Mode, Phase};
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::Rect,
    DefaultTerminal,
};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Start,
    Difficulty,
    Game,
}

/// Menu states for navigation
#[derive(Debug, Default)]
pub struct MenuState {
    pub start_selected: usize,
    pub difficulty_selected: usize,
    pub game_over_selected: usize,
}

pub const START_MENU: [&str; 3] = ["Play vs AI", "Local Versus", "Quit"];
pub const DIFFICULTY_MENU: [&str; 4] = ["Easy", "Medium", "Hard", "Back"];
pub const GAME_OVER_MENU: [&str; 2] = ["Play Again", "Exit to Menu"];

/// Game board size constants
const MIN_GAME_WIDTH: u16 = 60;
const MIN_GAME_HEIGHT: u16 = 20;
const MAX_GAME_WIDTH: u16 = 84;
/// Rows around the field: header, controls and borders
const GAME_CHROME_ROWS: u16 = 8;

/// Main application
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub menu_state: MenuState,
    /// Match in progress, drawing to the terminal surface
    pub game: Option<Game<TerminalSurface>>,
    /// Frame requests from the match, served on the next tick
    scheduler: ManualScheduler,
    keys: PaddleKeys,
    events: EventHandler,
    pub terminal_size: (u16, u16),
    /// Whether UI is paused due to small terminal
    pub ui_paused: bool,
    /// Last match construction failure, shown on the start screen
    pub last_error: Option<String>,
}

impl App {
    pub fn new(terminal_size: (u16, u16)) -> color_eyre::Result<Self> {
        let events = EventHandler::new()?;
        let keys = PaddleKeys::new(events.keyboard_enhanced());

        let mut app = Self {
            running: true,
            screen: AppScreen::Start,
            menu_state: MenuState::default(),
            game: None,
            scheduler: ManualScheduler::new(),
            keys,
            events,
            terminal_size,
            ui_paused: false,
            last_error: None,
        };
        app.handle_resize(terminal_size.0, terminal_size.1);
        Ok(app)
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_events()?;
        }
        self.stop_match();
        Ok(())
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick(),
            Event::Crossterm(ratatui::crossterm::event::Event::Key(key_event)) => {
                self.handle_key_event(key_event)
            }
            Event::Crossterm(_) => {}
            Event::App(app_event) => self.handle_app_event(app_event),
        }
        Ok(())
    }

    /// Handle key events and convert to app events
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        let pressed = key_event.kind != KeyEventKind::Release;

        // Global quit keys
        match key_event.code {
            KeyCode::Char('q') if pressed => {
                self.events.send(AppEvent::Quit);
                return;
            }
            KeyCode::Char('c') | KeyCode::Char('C')
                if pressed && key_event.modifiers == KeyModifiers::CONTROL =>
            {
                self.events.send(AppEvent::Quit);
                return;
            }
            _ => {}
        }

        match self.screen {
            AppScreen::Start | AppScreen::Difficulty => {
                if !pressed {
                    return;
                }
                match key_event.code {
                    KeyCode::Up => self.events.send(AppEvent::MenuUp),
                    KeyCode::Down => self.events.send(AppEvent::MenuDown),
                    KeyCode::Enter => self.events.send(AppEvent::MenuSelect),
                    KeyCode::Esc if self.screen == AppScreen::Difficulty => {
                        self.events.send(AppEvent::NavigateToStart)
                    }
                    KeyCode::Esc => self.events.send(AppEvent::Quit),
                    _ => {}
                }
            }
            AppScreen::Game => self.handle_game_key(key_event, pressed),
        }
    }

    fn handle_game_key(&mut self, key_event: KeyEvent, pressed: bool) {
        let phase = match &self.game {
            Some(game) => game.phase(),
            None => return,
        };

        // The game-over modal takes the arrow keys
        if phase == Phase::Ended {
            if pressed {
                match key_event.code {
                    KeyCode::Up => self.events.send(AppEvent::MenuUp),
                    KeyCode::Down => self.events.send(AppEvent::MenuDown),
                    KeyCode::Enter => self.events.send(AppEvent::MenuSelect),
                    _ => {}
                }
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc if key_event.kind == KeyEventKind::Press => {
                if let Some(game) = self.game.as_mut() {
                    game.toggle_pause();
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') if pressed && phase == Phase::Paused => {
                self.events.send(AppEvent::NavigateToStart);
            }
            _ => {
                let changes = self.keys.key_event(key_event);
                self.apply_key_changes(&changes);
            }
        }
    }

    fn apply_key_changes(&mut self, changes: &[KeyChange]) {
        if let Some(game) = self.game.as_mut() {
            for &(side, direction, pressed) in changes {
                game.set_directional_input(side, direction, pressed);
            }
        }
    }

    /// Handle application events
    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::NavigateToStart => self.navigate_to_start(),
            AppEvent::NavigateToDifficulty => self.screen = AppScreen::Difficulty,
            AppEvent::StartMatch(mode) => self.start_match(mode),
            AppEvent::MenuUp => self.menu_step(-1),
            AppEvent::MenuDown => self.menu_step(1),
            AppEvent::MenuSelect => self.menu_select(),
            AppEvent::TerminalResize(width, height) => self.handle_resize(width, height),
        }
    }

    /// One display refresh: age latched keys, then run the match frame if it asked for one
    fn tick(&mut self) {
        let released = self.keys.tick();
        self.apply_key_changes(&released);

        if self.ui_paused {
            return;
        }
        if let Some(game) = self.game.as_mut() {
            if self.scheduler.take() {
                game.frame(&mut self.scheduler);
            }
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }

    fn navigate_to_start(&mut self) {
        self.stop_match();
        self.screen = AppScreen::Start;
    }

    fn menu_step(&mut self, delta: isize) {
        let (selected, len) = match self.screen {
            AppScreen::Start => (&mut self.menu_state.start_selected, START_MENU.len()),
            AppScreen::Difficulty => (
                &mut self.menu_state.difficulty_selected,
                DIFFICULTY_MENU.len(),
            ),
            AppScreen::Game => (
                &mut self.menu_state.game_over_selected,
                GAME_OVER_MENU.len(),
            ),
        };
        *selected = (*selected as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn menu_select(&mut self) {
        match self.screen {
            AppScreen::Start => match self.menu_state.start_selected {
                0 => self.events.send(AppEvent::NavigateToDifficulty),
                1 => self.events.send(AppEvent::StartMatch(Mode::Versus)),
                _ => self.events.send(AppEvent::Quit),
            },
            AppScreen::Difficulty => {
                match Difficulty::ALL.get(self.menu_state.difficulty_selected) {
                    Some(&difficulty) => self
                        .events
                        .send(AppEvent::StartMatch(Mode::Ai(difficulty))),
                    None => self.events.send(AppEvent::NavigateToStart),
                }
            }
            AppScreen::Game => match self.menu_state.game_over_selected {
                0 => self.play_again(),
                _ => self.events.send(AppEvent::NavigateToStart),
            },
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.ui_paused = width < MIN_GAME_WIDTH || height < MIN_GAME_HEIGHT;

        if let Some(game) = self.game.as_mut() {
            if let Some(viewport) = TerminalSurface::fit(Self::field_columns(width)) {
                game.resize(viewport.width, viewport.height);
            }
        }
    }

    /// Columns available to the field for a terminal `width` wide
    fn field_columns(width: u16) -> u16 {
        width.min(MAX_GAME_WIDTH).saturating_sub(2)
    }

    pub fn calculate_centered_game_area(&self, area: Rect) -> Option<Rect> {
        if self.ui_paused {
            return None;
        }

        let game_width = MAX_GAME_WIDTH.min(area.width);
        let field_rows = (Self::field_columns(game_width) / 4).max(6);
        let game_height = (field_rows + GAME_CHROME_ROWS).min(area.height);

        let x_offset = area.width.saturating_sub(game_width) / 2;
        let y_offset = area.height.saturating_sub(game_height) / 2;

        Some(Rect {
            x: area.x + x_offset,
            y: area.y + y_offset,
            width: game_width,
            height: game_height,
        })
    }

    fn start_match(&mut self, mode: Mode) {
        self.stop_match();

        let surface = TerminalSurface::new(Self::field_columns(self.terminal_size.0));
        match Game::new(Config::default(), surface) {
            Ok(mut game) => {
                game.start(mode, &mut self.scheduler);
                self.game = Some(game);
                self.keys.clear();
                self.menu_state.game_over_selected = 0;
                self.last_error = None;
                self.screen = AppScreen::Game;
            }
            Err(e) => {
                log::error!("could not start match: {}", e);
                self.last_error = Some(e.to_string());
                self.screen = AppScreen::Start;
            }
        }
    }

    fn play_again(&mut self) {
        if let Some(game) = self.game.as_mut() {
            self.keys.clear();
            game.restart(&mut self.scheduler);
            self.menu_state.game_over_selected = 0;
        }
    }

    /// Tear down the current match, if any
    fn stop_match(&mut self) {
        if let Some(game) = self.game.take() {
            game.stop(&mut self.scheduler);
            self.keys.clear();
        }
    }

    pub fn keyboard_hint(&self) -> &'static str {
        if self.keys.is_enhanced() {
            "hold keys"
        } else {
            "tap/hold keys"
        }
    }
}
