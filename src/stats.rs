/// Session counters.

use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    /// Best score seen by this process. Never reset.
    pub high_score: u32,
    pub game_active: bool,
}

impl GameStats {
    /// Fresh stats for a new process: idle, no high score yet.
    pub fn new(settings: &Settings) -> Self {
        GameStats {
            ships_left: settings.ship_limit,
            score: 0,
            level: 1,
            high_score: 0,
            game_active: false,
        }
    }

    /// Reset the per-session counters. High score and activity are untouched.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}
