/// The Play prompt shown while the game is idle.

use crate::entities::Rect;
use crate::settings::{Rgb, Settings};

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub color: Rgb,
    pub text_color: Rgb,
}

impl Button {
    /// The centred "Play" button.
    pub fn play(settings: &Settings) -> Self {
        let (w, h) = (settings.button_width, settings.button_height);
        let rect = Rect::new(
            settings.screen_width / 2 - w / 2,
            settings.screen_height / 2 - h / 2,
            w,
            h,
        );
        Button {
            rect,
            label: "Play".to_string(),
            color: settings.button_color,
            text_color: settings.button_text_color,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }
}
