//! Character-grid rendering for text front ends.
//!
//! Maps playfield pixels onto a `cols x rows` grid. Paddle height in cells is
//! fixed per grid so a paddle never grows or shrinks as it moves.

use crate::types::{Ball, Paddle, View};

pub const BALL_GLYPH: char = '●';
pub const PADDLE_GLYPH: char = '█';
pub const NET_GLYPH: char = '┊';

/// Inclusive cell rectangle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl CellRect {
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Pixel to cell mapping for one grid size
#[derive(Debug, Copy, Clone)]
pub struct RenderHelper {
    cols: usize,
    rows: usize,
    scale_x: f32,
    scale_y: f32,
    paddle_rows: usize,
    paddle_cols: usize,
}

impl RenderHelper {
    pub fn new(cols: usize, rows: usize, view: &View) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let scale_x = cols as f32 / view.field_width.max(1.0);
        let scale_y = rows as f32 / view.field_height.max(1.0);

        let paddle_rows = ((view.left.height * scale_y).round() as usize).clamp(1, rows);
        let paddle_cols = ((view.left.width * scale_x).round() as usize).clamp(1, cols);

        Self {
            cols,
            rows,
            scale_x,
            scale_y,
            paddle_rows,
            paddle_cols,
        }
    }

    pub fn paddle_height_cells(&self) -> usize {
        self.paddle_rows
    }

    fn col(&self, x: f32) -> usize {
        ((x.max(0.0) * self.scale_x) as usize).min(self.cols - 1)
    }

    fn row(&self, y: f32) -> usize {
        ((y.max(0.0) * self.scale_y) as usize).min(self.rows - 1)
    }

    /// Cell holding the ball centre. Positions off the field are pinned to the edge.
    pub fn ball_cell(&self, ball: &Ball) -> (usize, usize) {
        (self.col(ball.pos.x), self.row(ball.pos.y))
    }

    pub fn paddle_rect(&self, paddle: &Paddle) -> CellRect {
        let top = ((paddle.y.max(0.0) * self.scale_y).round() as usize).min(self.rows - self.paddle_rows);
        let left = self.col(paddle.x).min(self.cols - self.paddle_cols);

        CellRect {
            left,
            right: left + self.paddle_cols - 1,
            top,
            bottom: top + self.paddle_rows - 1,
        }
    }

    /// Draw `view` as text lines
    pub fn render_lines(&self, view: &View) -> Vec<String> {
        let left = self.paddle_rect(&view.left);
        let right = self.paddle_rect(&view.right);
        let (ball_x, ball_y) = self.ball_cell(&view.ball);
        let net = self.cols / 2;

        (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| {
                        if x == ball_x && y == ball_y {
                            BALL_GLYPH
                        } else if left.contains(x, y) || right.contains(x, y) {
                            PADDLE_GLYPH
                        } else if x == net {
                            NET_GLYPH
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
