/// Static configuration plus the dynamic difficulty values that scale per level.
///
/// `Settings` never changes once the game is built.  Everything that speeds
/// up between levels lives in `Difficulty`, which the game state owns and
/// resets at the start of each session.

use std::time::Duration;

use anyhow::{bail, Result};

use crate::compute::fleet_dimensions;

/// An RGB colour, independent of any rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Base settings ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    // Screen (logical pixels)
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // Ship
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_speed: f32,
    pub ship_limit: u32,
    pub ship_color: Rgb,

    // Bullets
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_speed: f32,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    // Aliens
    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_speed: f32,
    pub alien_color: Rgb,
    pub fleet_drop_speed: i32,
    pub alien_points: u32,

    // Level scaling
    pub speedup_scale: f32,
    pub score_scale: f32,

    // Play button
    pub button_width: i32,
    pub button_height: i32,
    pub button_color: Rgb,
    pub button_text_color: Rgb,

    // Pacing
    pub frame_rate: u32,
    /// Real-time freeze after losing a ship that still leaves lives.
    pub hit_pause: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            bg_color: Rgb(10, 10, 30),

            ship_width: 50,
            ship_height: 30,
            ship_speed: 5.0,
            ship_limit: 3,
            ship_color: Rgb(220, 220, 220),

            bullet_width: 3,
            bullet_height: 15,
            bullet_speed: 8.0,
            bullet_color: Rgb(255, 220, 60),
            bullets_allowed: 3,

            alien_width: 40,
            alien_height: 30,
            alien_speed: 1.5,
            alien_color: Rgb(90, 220, 90),
            fleet_drop_speed: 15,
            alien_points: 50,

            speedup_scale: 1.1,
            score_scale: 1.5,

            button_width: 200,
            button_height: 50,
            button_color: Rgb(0, 135, 0),
            button_text_color: Rgb(255, 255, 255),

            frame_rate: 60,
            hit_pause: Duration::from_millis(500),
        }
    }
}

impl Settings {
    /// Reject a playfield that cannot hold at least one alien and the ship.
    pub fn validate(&self) -> Result<()> {
        let (cols, rows) = fleet_dimensions(self, self.ship_height);
        if cols < 1 || rows < 1 {
            bail!(
                "a {}x{} screen has no room for the alien fleet ({} columns, {} rows)",
                self.screen_width,
                self.screen_height,
                cols,
                rows
            );
        }
        if self.screen_width < self.ship_width {
            bail!("a {} pixel wide screen cannot fit the ship", self.screen_width);
        }
        Ok(())
    }

    /// Duration of one frame at the configured tick ceiling.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

// ── Fleet state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Right,
    Left,
}

impl FleetDirection {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

/// Motion shared by every alien in the fleet.  Owned by the game loop and
/// handed to each alien update by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FleetState {
    pub direction: FleetDirection,
    pub speed: f32,
}

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Values that reset each session and grow each level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_points: u32,
    pub fleet: FleetState,
}

impl Difficulty {
    pub fn initial(settings: &Settings) -> Self {
        Self {
            ship_speed: settings.ship_speed,
            bullet_speed: settings.bullet_speed,
            alien_points: settings.alien_points,
            fleet: FleetState {
                direction: FleetDirection::Right,
                speed: settings.alien_speed,
            },
        }
    }

    /// Speed everything up and raise the per-alien score.  Fleet direction
    /// carries over.
    pub fn increase(&self, settings: &Settings) -> Self {
        let scale = settings.speedup_scale;
        Self {
            ship_speed: self.ship_speed * scale,
            bullet_speed: self.bullet_speed * scale,
            alien_points: (self.alien_points as f32 * settings.score_scale) as u32,
            fleet: FleetState {
                speed: self.fleet.speed * scale,
                ..self.fleet
            },
        }
    }
}
