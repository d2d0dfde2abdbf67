/// The render pass: what gets drawn, in which order.  How pixels (or terminal
/// cells) are produced is up to the `Renderer` implementation.

use crate::button::Button;
use crate::compute::GameState;
use crate::entities::Drawable;
use crate::scoreboard::Scoreboard;
use crate::settings::Rgb;

pub trait Renderer {
    type Error;

    fn clear(&mut self, background: Rgb) -> Result<(), Self::Error>;
    fn draw_sprite(&mut self, sprite: &dyn Drawable, color: Rgb) -> Result<(), Self::Error>;
    fn draw_scoreboard(&mut self, board: &Scoreboard) -> Result<(), Self::Error>;
    fn draw_button(&mut self, button: &Button) -> Result<(), Self::Error>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), Self::Error>;
    /// Make the finished frame visible.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Render one complete frame.
pub fn draw_frame<R: Renderer>(state: &GameState, renderer: &mut R) -> Result<(), R::Error> {
    let settings = &state.settings;
    renderer.clear(settings.bg_color)?;

    renderer.draw_sprite(&state.ship, settings.ship_color)?;
    for bullet in &state.bullets {
        renderer.draw_sprite(bullet, settings.bullet_color)?;
    }
    for alien in &state.aliens {
        renderer.draw_sprite(alien, settings.alien_color)?;
    }

    renderer.draw_scoreboard(&state.scoreboard)?;

    if !state.stats.game_active {
        renderer.draw_button(&state.play_button)?;
    }

    renderer.set_cursor_visible(state.cursor_visible)?;
    renderer.present()
}
