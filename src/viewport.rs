/// Mapping between the game's logical pixel space and a grid of terminal
/// cells.  Row 0 is the HUD and the last row is the controls hint; the play
/// area fills the rows in between.

use crate::entities::Rect;

pub const HUD_ROWS: u16 = 1;
pub const HINT_ROWS: u16 = 1;

/// A rectangle of terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, screen_width: i32, screen_height: i32) -> Self {
        Viewport { cols, rows, screen_width, screen_height }
    }

    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS + HINT_ROWS).max(1)
    }

    fn col_of(&self, x: i32) -> u16 {
        let w = self.screen_width.max(1) as i64;
        let col = (x.clamp(0, self.screen_width) as i64 * self.cols as i64) / w;
        col.min(self.cols.saturating_sub(1) as i64) as u16
    }

    fn row_of(&self, y: i32) -> u16 {
        let h = self.screen_height.max(1) as i64;
        let rows = self.play_rows() as i64;
        let row = (y.clamp(0, self.screen_height) as i64 * rows) / h;
        HUD_ROWS + row.min(rows - 1) as u16
    }

    /// Cells covered by a logical rectangle, at least one cell in each
    /// direction.  `None` when the rectangle is entirely off screen.
    pub fn cells(&self, rect: &Rect) -> Option<CellRect> {
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.left() >= self.screen_width
            || rect.top() >= self.screen_height
        {
            return None;
        }
        let col = self.col_of(rect.left());
        let row = self.row_of(rect.top());
        let last_col = self.col_of(rect.right() - 1).max(col);
        let last_row = self.row_of(rect.bottom() - 1).max(row);
        Some(CellRect {
            col,
            row,
            width: last_col - col + 1,
            height: last_row - row + 1,
        })
    }

    /// Logical pixel at the centre of a cell.  `None` outside the play area.
    pub fn to_screen(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        if col >= self.cols || row < HUD_ROWS || row >= HUD_ROWS + self.play_rows() {
            return None;
        }
        let cell_w = self.screen_width as f32 / self.cols.max(1) as f32;
        let cell_h = self.screen_height as f32 / self.play_rows() as f32;
        let x = (col as f32 + 0.5) * cell_w;
        let y = ((row - HUD_ROWS) as f32 + 0.5) * cell_h;
        Some((x as i32, y as i32))
    }
}
