/// Rendering layer: all terminal output lives here.
///
/// `TerminalRenderer` implements the game's `Renderer` collaborator by
/// projecting logical pixels onto terminal cells through a `Viewport`.  No
/// game logic is performed; this module only translates draw requests into
/// terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use alien_invasion::button::Button;
use alien_invasion::entities::{Drawable, SpriteKind};
use alien_invasion::render::Renderer;
use alien_invasion::scoreboard::Scoreboard;
use alien_invasion::settings::Rgb;
use alien_invasion::viewport::{CellRect, Viewport};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   ENTER / click Play : Start   Q : Quit";

fn to_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb { r, g, b }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    background: Color,
    /// Last cursor visibility sent to the terminal.
    cursor_visible: Option<bool>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        TerminalRenderer {
            out,
            viewport,
            background: Color::Reset,
            cursor_visible: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Follow terminal resizes.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport.cols = cols;
        self.viewport.rows = rows;
    }

    fn print_at(&mut self, col: u16, row: u16, text: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_ship(&mut self, cells: CellRect) -> io::Result<()> {
        // Tip on the top row, hull below:
        //    ▲
        //  ◢███◣
        let tip_col = cells.col + cells.width / 2;
        self.print_at(tip_col, cells.row, "▲")?;
        let hull = if cells.width >= 3 {
            format!("◢{}◣", "█".repeat(cells.width as usize - 2))
        } else {
            "█".repeat(cells.width as usize)
        };
        for row in cells.row + 1..cells.row + cells.height {
            self.print_at(cells.col, row, &hull)?;
        }
        Ok(())
    }

    fn draw_alien(&mut self, cells: CellRect) -> io::Result<()> {
        //   «▼▼»    ← swept-back wings
        //   ╚══╝    ← engine block
        let w = cells.width as usize;
        let (wings, engine) = match w {
            1 => ("▼".to_string(), "╨".to_string()),
            _ => (
                format!("«{}»", "▼".repeat(w - 2)),
                format!("╚{}╝", "═".repeat(w - 2)),
            ),
        };
        self.print_at(cells.col, cells.row, &wings)?;
        for row in cells.row + 1..cells.row + cells.height {
            self.print_at(cells.col, row, &engine)?;
        }
        Ok(())
    }

    fn draw_bullet(&mut self, cells: CellRect) -> io::Result<()> {
        let col = cells.col + cells.width / 2;
        for row in cells.row..cells.row + cells.height {
            self.print_at(col, row, "║")?;
        }
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> io::Result<()> {
        let row = self.viewport.rows.saturating_sub(1);
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.print_at(1, row, CONTROLS_HINT)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn clear(&mut self, background: Rgb) -> io::Result<()> {
        self.background = to_color(background);
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: &dyn Drawable, color: Rgb) -> io::Result<()> {
        let Some(cells) = self.viewport.cells(&sprite.rect()) else {
            return Ok(());
        };
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        match sprite.kind() {
            SpriteKind::Ship => self.draw_ship(cells),
            SpriteKind::Alien => self.draw_alien(cells),
            SpriteKind::Bullet => self.draw_bullet(cells),
        }
    }

    fn draw_scoreboard(&mut self, board: &Scoreboard) -> io::Result<()> {
        let cols = self.viewport.cols;

        // Lives, left
        let lives = format!("Ships {}", "▲".repeat(board.ships as usize));
        self.out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        self.print_at(1, 0, &lives)?;

        // High score, centre
        let high = format!("High {}", board.high_score_text);
        let hx = (cols / 2).saturating_sub(high.chars().count() as u16 / 2);
        self.out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
        self.print_at(hx, 0, &high)?;

        // Score and level, right
        let score = format!("Score {}  Level {}", board.score_text, board.level_text);
        let sx = cols.saturating_sub(score.chars().count() as u16 + 1);
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.print_at(sx, 0, &score)
    }

    fn draw_button(&mut self, button: &Button) -> io::Result<()> {
        let Some(cells) = self.viewport.cells(&button.rect) else {
            return Ok(());
        };
        self.out.queue(style::SetBackgroundColor(to_color(button.color)))?;
        let blank = " ".repeat(cells.width as usize);
        for row in cells.row..cells.row + cells.height {
            self.print_at(cells.col, row, &blank)?;
        }

        let label_len = button.label.chars().count() as u16;
        let lx = cells.col + cells.width.saturating_sub(label_len) / 2;
        let ly = cells.row + cells.height / 2;
        self.out.queue(style::SetForegroundColor(to_color(button.text_color)))?;
        self.print_at(lx, ly, &button.label)?;

        self.out.queue(style::SetBackgroundColor(self.background))?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if self.cursor_visible != Some(visible) {
            if visible {
                self.out.queue(cursor::Show)?;
            } else {
                self.out.queue(cursor::Hide)?;
            }
            self.cursor_visible = Some(visible);
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.draw_controls_hint()?;
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
