/// Display text derived from `GameStats`.
///
/// The scoreboard is a cache: its text only changes when one of the `prep_*`
/// methods is called after the matching stat changed.  Drawing never
/// recomputes anything.

use crate::stats::GameStats;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    /// Number of ship icons to show for remaining lives.
    pub ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut board = Scoreboard::default();
        board.prep_all(stats);
        board
    }

    pub fn prep_all(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }

    /// Raise the high score to the current score if it was beaten.
    pub fn check_high_score(&mut self, stats: &mut GameStats) {
        if stats.score > stats.high_score {
            stats.high_score = stats.score;
            self.prep_high_score(stats);
        }
    }
}

/// Round to the nearest ten (halves up) and group thousands with commas.
pub fn format_score(score: u32) -> String {
    let rounded = (score as u64 + 5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
