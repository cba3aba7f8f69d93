use crate::app::{App, AppScreen, DIFFICULTY_MENU, GAME_OVER_MENU, START_MENU};
use crate::surface::Overlay;
use pong_core::{RenderHelper, View};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, List, ListItem, Paragraph, Widget},
};

fn titled_block(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Center)
}

fn menu_list<'a>(items: &[&'a str], selected: usize, title: &'a str) -> List<'a> {
    let items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(*item).style(style)
        })
        .collect();

    List::new(items).block(titled_block(title))
}

/// `width` x `height` rect centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let header = match (&self.screen, &self.game) {
            (AppScreen::Game, Some(game)) => game.mode().label(),
            _ => "🏓 Pong 🏓".to_string(),
        };
        Paragraph::new(header)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(titled_block("Pong"))
            .render(chunks[0], buf);

        match self.screen {
            AppScreen::Start => self.render_start_screen(chunks[1], buf),
            AppScreen::Difficulty => self.render_difficulty_screen(chunks[1], buf),
            AppScreen::Game => self.render_game_screen(chunks[1], buf),
        }
    }
}

impl App {
    fn render_start_screen(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        menu_list(&START_MENU, self.menu_state.start_selected, "Main Menu").render(chunks[0], buf);

        let (footer, color) = match &self.last_error {
            Some(error) => (format!("Could not start match: {}", error), Color::Red),
            None => ("↑/↓: Select   ENTER: Confirm   Q: Quit".to_string(), Color::DarkGray),
        };
        Paragraph::new(footer)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }

    fn render_difficulty_screen(&self, area: Rect, buf: &mut Buffer) {
        menu_list(
            &DIFFICULTY_MENU,
            self.menu_state.difficulty_selected,
            "AI Difficulty",
        )
        .render(area, buf);
    }

    fn render_game_screen(&self, area: Rect, buf: &mut Buffer) {
        if self.ui_paused {
            let message = format!(
                "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}\n\nPlease resize your terminal to continue playing.",
                60, // MIN_GAME_WIDTH
                20, // MIN_GAME_HEIGHT
                self.terminal_size.0,
                self.terminal_size.1
            );

            Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(titled_block("⚠ Resize Required ⚠"))
                .render(area, buf);
            return;
        }

        let (Some(game), Some(game_area)) = (&self.game, self.calculate_centered_game_area(area))
        else {
            return;
        };
        let view = game.surface().frame.unwrap_or_else(|| game.view());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Score
                Constraint::Min(6),    // Field
                Constraint::Length(3), // Controls
            ])
            .split(game_area);

        let score_content = format!(
            "Player 1  {}  -  {}  {}    [{}]",
            view.score[0],
            view.score[1],
            if view.mode.is_ai() { "AI" } else { "Player 2" },
            game.status_string()
        );
        Paragraph::new(score_content)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(titled_block("Score"))
            .render(chunks[0], buf);

        self.render_field(chunks[1], buf, &view);

        let controls_text = if view.mode.is_ai() {
            format!("P1: W/S   ESC: Pause   Q: Quit   ({})", self.keyboard_hint())
        } else {
            format!(
                "P1: W/S   P2: ↑/↓   ESC: Pause   Q: Quit   ({})",
                self.keyboard_hint()
            )
        };
        Paragraph::new(controls_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(titled_block("Controls"))
            .render(chunks[2], buf);

        match &game.surface().overlay {
            Overlay::None => {}
            Overlay::Paused => self.render_pause_overlay(chunks[1], buf),
            Overlay::GameOver { label, score } => {
                self.render_game_over(chunks[1], buf, label, *score)
            }
        }
    }

    fn render_field(&self, area: Rect, buf: &mut Buffer, view: &View) {
        let block = titled_block("Field");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let helper = RenderHelper::new(inner.width as usize, inner.height as usize, view);
        let lines: Vec<Line> = helper
            .render_lines(view)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(inner, buf);
    }

    fn render_pause_overlay(&self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 36, 5);
        Clear.render(popup, buf);
        Paragraph::new("PAUSED\n\nESC: Resume   X: Exit to Menu")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(titled_block("Paused"))
            .render(popup, buf);
    }

    fn render_game_over(&self, area: Rect, buf: &mut Buffer, label: &str, score: [u8; 2]) {
        let popup = centered(area, 32, 9);
        Clear.render(popup, buf);

        let block = titled_block("Game Over");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(2)])
            .split(inner);

        Paragraph::new(format!(
            "{} Wins!\nFinal score: {} - {}",
            label, score[0], score[1]
        ))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let items: Vec<Line> = GAME_OVER_MENU
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.menu_state.game_over_selected {
                    Style::default().fg(Color::Yellow).bg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::styled(*item, style).alignment(Alignment::Center)
            })
            .collect();
        Paragraph::new(items).render(chunks[1], buf);
    }
}
