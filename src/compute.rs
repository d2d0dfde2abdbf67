/// Pure game-logic functions.
///
/// Every public transition takes an immutable reference to the current
/// `GameState` and returns a brand-new one (plus, where the caller needs to
/// react, a small report).  Internally each transition clones the state once
/// and mutates the copy in place.

use crate::button::Button;
use crate::entities::{Alien, Bullet, Rect, Ship, ShipContext, Sprite};
use crate::input::{steer, AnalogAxes, Control, InputEvent, Key, STEERING_AXIS};
use crate::keymap::{ButtonAction, ControllerKeymap};
use crate::scoreboard::Scoreboard;
use crate::settings::{Difficulty, Settings};
use crate::stats::GameStats;

// ── State ─────────────────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    pub difficulty: Difficulty,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    /// Live bullets, in firing order.
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub play_button: Button,
    pub axes: AnalogAxes,
    pub cursor_visible: bool,
    /// Active ticks since the process started.
    pub frame: u64,
}

/// Outcome of a ship being struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLoss {
    /// Ships remain; the fleet was rebuilt and the loop should pause.
    Respawned,
    /// That was the last ship; the game is idle again.
    GameOver,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub aliens_destroyed: u32,
    pub points: u32,
    pub leveled_up: bool,
    pub fleet_dropped: bool,
    pub life_lost: Option<LifeLoss>,
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Build the idle start-up state: full fleet on screen, Play prompt shown.
pub fn init_state(settings: Settings) -> GameState {
    let stats = GameStats::new(&settings);
    let ship = Ship::new(&settings);
    let aliens = create_fleet(&settings, ship.rect.h);
    GameState {
        difficulty: Difficulty::initial(&settings),
        scoreboard: Scoreboard::new(&stats),
        play_button: Button::play(&settings),
        stats,
        ship,
        bullets: Vec::new(),
        aliens,
        axes: AnalogAxes::default(),
        cursor_visible: true,
        frame: 0,
        settings,
    }
}

// ── Fleet formation ───────────────────────────────────────────────────────────

/// Columns and rows of the largest grid that fits the screen, with one alien
/// of spacing between neighbours and room for the ship plus a margin below.
pub fn fleet_dimensions(settings: &Settings, ship_height: i32) -> (i32, i32) {
    let w = settings.alien_width;
    let h = settings.alien_height;
    if w <= 0 || h <= 0 {
        return (0, 0);
    }
    let available_x = (settings.screen_width - 2 * w).max(0);
    let cols = available_x / (2 * w);
    let available_y = (settings.screen_height - 3 * h - ship_height).max(0);
    let rows = available_y / (2 * h);
    (cols, rows)
}

/// A full fleet, row by row.
pub fn create_fleet(settings: &Settings, ship_height: i32) -> Vec<Alien> {
    let (cols, rows) = fleet_dimensions(settings, ship_height);
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .map(|(col, row)| Alien::new(settings, col, row))
        .collect()
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

/// Apply one input event.  Returns `Control::Quit` when the game should end.
pub fn handle_input(
    state: &GameState,
    event: &InputEvent,
    keymap: &ControllerKeymap,
) -> (GameState, Control) {
    match *event {
        InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => (state.clone(), Control::Quit),
        InputEvent::KeyDown(key) => (key_down(state, key), Control::Continue),
        InputEvent::KeyUp(key) => (key_up(state, key), Control::Continue),
        InputEvent::Click { x, y } => (check_play_button(state, x, y), Control::Continue),
        InputEvent::Axis { axis, value } => (apply_axis(state, axis, value), Control::Continue),
        InputEvent::ControllerButtonDown(id) => {
            let next = match keymap.action_for(id) {
                Some(ButtonAction::Fire) => fire_bullet(state),
                Some(ButtonAction::Play) => start_game(state),
                Some(ButtonAction::MoveLeft) => key_down(state, Key::Left),
                Some(ButtonAction::MoveRight) => key_down(state, Key::Right),
                None => state.clone(),
            };
            (next, Control::Continue)
        }
        InputEvent::ControllerButtonUp(id) => {
            let next = match keymap.action_for(id) {
                Some(ButtonAction::MoveLeft) => key_up(state, Key::Left),
                Some(ButtonAction::MoveRight) => key_up(state, Key::Right),
                _ => state.clone(),
            };
            (next, Control::Continue)
        }
    }
}

fn key_down(state: &GameState, key: Key) -> GameState {
    match key {
        Key::Left => set_movement(state, Some(true), None),
        Key::Right => set_movement(state, None, Some(true)),
        Key::Fire => fire_bullet(state),
        Key::Play => start_game(state),
        Key::Quit => state.clone(),
    }
}

fn key_up(state: &GameState, key: Key) -> GameState {
    match key {
        Key::Left => set_movement(state, Some(false), None),
        Key::Right => set_movement(state, None, Some(false)),
        _ => state.clone(),
    }
}

fn set_movement(state: &GameState, left: Option<bool>, right: Option<bool>) -> GameState {
    let mut next = state.clone();
    if let Some(left) = left {
        next.ship.moving_left = left;
    }
    if let Some(right) = right {
        next.ship.moving_right = right;
    }
    next
}

fn apply_axis(state: &GameState, axis: usize, value: f32) -> GameState {
    let mut next = state.clone();
    next.axes.set(axis, value);
    if axis == STEERING_AXIS {
        let (left, right) = steer(next.axes.steering_value());
        next.ship.moving_left = left;
        next.ship.moving_right = right;
    }
    next
}

/// Start a game if the click landed on the Play button while idle.
pub fn check_play_button(state: &GameState, x: i32, y: i32) -> GameState {
    if state.play_button.contains(x, y) {
        start_game(state)
    } else {
        state.clone()
    }
}

/// Idle → Active.  No-op while a game is already running.
pub fn start_game(state: &GameState) -> GameState {
    if state.stats.game_active {
        return state.clone();
    }
    let mut next = state.clone();
    next.difficulty = Difficulty::initial(&next.settings);
    next.stats.reset_stats(&next.settings);
    next.stats.game_active = true;
    next.scoreboard.prep_all(&next.stats);
    next.cursor_visible = false;
    respawn_fleet(&mut next);
    tracing::info!(ships = next.stats.ships_left, aliens = next.aliens.len(), "game started");
    next
}

/// Fire a bullet from the ship, unless the live-bullet cap is reached or the
/// game is idle.
pub fn fire_bullet(state: &GameState) -> GameState {
    if !state.stats.game_active || state.bullets.len() >= state.settings.bullets_allowed {
        return state.clone();
    }
    let mut next = state.clone();
    let bullet = Bullet::new(&next.settings, &next.ship);
    next.bullets.push(bullet);
    next
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Stages run in a fixed order, and each stage sees the results of the ones
/// before it:
///
/// 1. ship moves
/// 2. bullets move, off-screen bullets are pruned
/// 3. bullet/alien collisions; an emptied fleet triggers the level-up
/// 4. fleet-edge check (drop + reverse), then aliens move
/// 5. life-loss check: ship/alien overlap or an alien at the bottom
///
/// Because stage 3 rebuilds an emptied fleet before stage 5 looks at it,
/// destroying the last alien never costs a life in the same tick.  Both
/// life-loss conditions together still cost a single ship.
///
/// An idle game does not change.
pub fn tick(state: &GameState) -> (GameState, TickReport) {
    let mut report = TickReport::default();
    if !state.stats.game_active {
        return (state.clone(), report);
    }

    let mut next = state.clone();
    next.frame += 1;

    update_ship(&mut next);
    update_bullets(&mut next);
    resolve_bullet_hits(&mut next, &mut report);
    report.fleet_dropped = update_aliens(&mut next);

    if life_lost(&next) {
        report.life_lost = Some(lose_ship(&mut next));
    }

    (next, report)
}

fn update_ship(state: &mut GameState) {
    let ctx = ShipContext {
        speed: state.difficulty.ship_speed,
        screen_width: state.settings.screen_width,
    };
    state.ship.update(ctx);
}

fn update_bullets(state: &mut GameState) {
    let speed = state.difficulty.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.update(speed);
    }
    state.bullets.retain(|b| !b.is_off_screen());
}

/// Each bullet takes out at most one alien: the first live one it overlaps.
fn resolve_bullet_hits(state: &mut GameState, report: &mut TickReport) {
    let mut bullet_hit = vec![false; state.bullets.len()];
    let mut alien_hit = vec![false; state.aliens.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let target = state
            .aliens
            .iter()
            .enumerate()
            .find(|(ai, alien)| !alien_hit[*ai] && bullet.rect.collides(&alien.rect));
        if let Some((ai, _)) = target {
            alien_hit[ai] = true;
            bullet_hit[bi] = true;
        }
    }

    let destroyed = alien_hit.iter().filter(|&&hit| hit).count() as u32;
    if destroyed > 0 {
        let mut flags = bullet_hit.into_iter();
        state.bullets.retain(|_| !flags.next().unwrap_or(false));
        let mut flags = alien_hit.into_iter();
        state.aliens.retain(|_| !flags.next().unwrap_or(false));

        let points = destroyed * state.difficulty.alien_points;
        state.stats.score += points;
        state.scoreboard.prep_score(&state.stats);
        state.scoreboard.check_high_score(&mut state.stats);

        report.aliens_destroyed = destroyed;
        report.points = points;
    }

    if destroyed > 0 && state.aliens.is_empty() {
        level_up(state);
        report.leveled_up = true;
    }
}

fn level_up(state: &mut GameState) {
    state.bullets.clear();
    state.aliens = create_fleet(&state.settings, state.ship.rect.h);
    state.difficulty = state.difficulty.increase(&state.settings);
    state.stats.level += 1;
    state.scoreboard.prep_level(&state.stats);
    tracing::info!(
        level = state.stats.level,
        alien_points = state.difficulty.alien_points,
        "fleet cleared"
    );
}

/// Returns true when the fleet hit an edge and dropped this tick.
fn update_aliens(state: &mut GameState) -> bool {
    let screen_width = state.settings.screen_width;
    let dropped = state.aliens.iter().any(|a| a.at_edge(screen_width));
    if dropped {
        change_fleet_direction(state);
    }
    let fleet = state.difficulty.fleet;
    for alien in &mut state.aliens {
        alien.update(fleet);
    }
    dropped
}

fn change_fleet_direction(state: &mut GameState) {
    let drop = state.settings.fleet_drop_speed;
    for alien in &mut state.aliens {
        alien.drop_by(drop);
    }
    state.difficulty.fleet.direction = state.difficulty.fleet.direction.reversed();
}

fn life_lost(state: &GameState) -> bool {
    let ship = state.ship.rect;
    let bottom = state.settings.screen_height;
    state
        .aliens
        .iter()
        .any(|a| a.rect.collides(&ship) || a.rect.bottom() >= bottom)
}

// ── Life loss ─────────────────────────────────────────────────────────────────

/// Respond to the ship being struck by an alien.
pub fn ship_hit(state: &GameState) -> (GameState, LifeLoss) {
    let mut next = state.clone();
    let outcome = lose_ship(&mut next);
    (next, outcome)
}

fn lose_ship(state: &mut GameState) -> LifeLoss {
    state.stats.ships_left = state.stats.ships_left.saturating_sub(1);
    state.scoreboard.prep_ships(&state.stats);

    if state.stats.ships_left > 0 {
        respawn_fleet(state);
        tracing::debug!(ships_left = state.stats.ships_left, "ship lost");
        LifeLoss::Respawned
    } else {
        state.stats.game_active = false;
        state.cursor_visible = true;
        tracing::info!(
            score = state.stats.score,
            level = state.stats.level,
            high_score = state.stats.high_score,
            "game over"
        );
        LifeLoss::GameOver
    }
}

/// Clear aliens and bullets, build a fresh fleet and recentre the ship.
fn respawn_fleet(state: &mut GameState) {
    state.bullets.clear();
    state.aliens = create_fleet(&state.settings, state.ship.rect.h);
    state.ship.center(&state.settings);
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Bounding box of the whole fleet, if any alien is alive.
pub fn fleet_bounds(state: &GameState) -> Option<Rect> {
    let first = state.aliens.first()?.rect;
    let (l, t, r, b) = state.aliens.iter().fold(
        (first.left(), first.top(), first.right(), first.bottom()),
        |(l, t, r, b), a| {
            (
                l.min(a.rect.left()),
                t.min(a.rect.top()),
                r.max(a.rect.right()),
                b.max(a.rect.bottom()),
            )
        },
    );
    Some(Rect::new(l, t, r - l, b - t))
}
