use std::fs;

use alien_invasion::compute::*;
use alien_invasion::input::*;
use alien_invasion::keymap::*;
use alien_invasion::settings::Settings;

fn idle() -> GameState {
    init_state(Settings::default())
}

fn active() -> GameState {
    start_game(&idle())
}

fn apply(state: &GameState, event: InputEvent) -> GameState {
    let (next, control) = handle_input(state, &event, &ControllerKeymap::default());
    assert_eq!(control, Control::Continue);
    next
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

#[test]
fn arrow_keys_set_and_clear_flags() {
    let s = active();
    let s = apply(&s, InputEvent::KeyDown(Key::Left));
    assert!(s.ship.moving_left);
    let s = apply(&s, InputEvent::KeyDown(Key::Right));
    assert!(s.ship.moving_right);
    let s = apply(&s, InputEvent::KeyUp(Key::Left));
    assert!(!s.ship.moving_left);
    assert!(s.ship.moving_right);
    let s = apply(&s, InputEvent::KeyUp(Key::Right));
    assert!(!s.ship.moving_right);
}

#[test]
fn fire_key_adds_bullet() {
    let s = apply(&active(), InputEvent::KeyDown(Key::Fire));
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn play_key_starts_game() {
    let s = apply(&idle(), InputEvent::KeyDown(Key::Play));
    assert!(s.stats.game_active);
}

#[test]
fn quit_key_and_event_request_exit() {
    let keymap = ControllerKeymap::default();
    let (_, control) = handle_input(&active(), &InputEvent::KeyDown(Key::Quit), &keymap);
    assert_eq!(control, Control::Quit);
    let (_, control) = handle_input(&idle(), &InputEvent::Quit, &keymap);
    assert_eq!(control, Control::Quit);
}

// ── Pointer ───────────────────────────────────────────────────────────────────

#[test]
fn click_on_play_button_starts_game() {
    let s = idle();
    let r = s.play_button.rect;
    let s = apply(&s, InputEvent::Click { x: r.center_x(), y: r.center_y() });
    assert!(s.stats.game_active);
    assert!(!s.cursor_visible);
}

#[test]
fn click_outside_button_does_nothing() {
    let s = apply(&idle(), InputEvent::Click { x: 5, y: 5 });
    assert!(!s.stats.game_active);
    assert!(s.cursor_visible);
}

#[test]
fn click_while_playing_does_not_restart() {
    let mut s = active();
    s.stats.score = 300;
    let r = s.play_button.rect;
    let s = apply(&s, InputEvent::Click { x: r.center_x(), y: r.center_y() });
    assert_eq!(s.stats.score, 300);
}

// ── Analog steering ───────────────────────────────────────────────────────────

#[test]
fn steer_thresholds() {
    assert_eq!(steer(-0.9), (true, false));
    assert_eq!(steer(0.9), (false, true));
    assert_eq!(steer(0.2), (false, false));
    assert_eq!(steer(-0.4), (false, false));
    assert_eq!(steer(-0.7), (false, false));
}

#[test]
fn half_pushed_stick_releases_steering() {
    assert_eq!(steer(-0.5), (false, false));
    assert_eq!(steer(0.6), (false, false));
}

#[test]
fn stick_drives_ship_flags() {
    let s = active();
    let s = apply(&s, InputEvent::Axis { axis: 0, value: -0.95 });
    assert!(s.ship.moving_left);
    assert_eq!(s.axes.steering_value(), -0.95);
    let s = apply(&s, InputEvent::Axis { axis: 0, value: -0.55 });
    assert!(!s.ship.moving_left && !s.ship.moving_right);
    let s = apply(&s, InputEvent::Axis { axis: 0, value: 0.8 });
    assert!(s.ship.moving_right);
    let s = apply(&s, InputEvent::Axis { axis: 0, value: 0.05 });
    assert!(!s.ship.moving_left && !s.ship.moving_right);
}

#[test]
fn other_axes_are_recorded_but_do_not_steer() {
    let s = apply(&active(), InputEvent::Axis { axis: 3, value: -1.0 });
    assert!(!s.ship.moving_left);
    assert_eq!(s.axes.values[3], -1.0);
    let s = apply(&s, InputEvent::Axis { axis: 42, value: 1.0 });
    assert_eq!(s.axes, AnalogAxes { values: [0.0, 0.0, 0.0, -1.0, -1.0, -1.0] });
}

// ── Controller buttons ────────────────────────────────────────────────────────

#[test]
fn controller_buttons_follow_keymap() {
    let keymap = ControllerKeymap::default();
    let x = keymap.id_of("x").unwrap();
    let left = keymap.id_of("left_arrow").unwrap();
    let options = keymap.id_of("options").unwrap();

    let s = apply(&idle(), InputEvent::ControllerButtonDown(options));
    assert!(s.stats.game_active);

    let s = apply(&s, InputEvent::ControllerButtonDown(x));
    assert_eq!(s.bullets.len(), 1);

    let s = apply(&s, InputEvent::ControllerButtonDown(left));
    assert!(s.ship.moving_left);
    let s = apply(&s, InputEvent::ControllerButtonUp(left));
    assert!(!s.ship.moving_left);

    let s = apply(&s, InputEvent::ControllerButtonDown(99));
    assert_eq!(s.bullets.len(), 1);
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[test]
fn held_keys_emit_down_and_up() {
    let mut held = HeldKeys::new(false);
    assert_eq!(held.press(Key::Left, 1), InputEvent::KeyDown(Key::Left));
    assert!(held.is_held(Key::Left));
    assert_eq!(held.release(Key::Left), Some(InputEvent::KeyUp(Key::Left)));
    assert_eq!(held.release(Key::Left), None);
}

#[test]
fn silent_keys_expire_only_when_enabled() {
    let mut classic = HeldKeys::new(true);
    classic.press(Key::Right, 10);
    assert!(classic.expire(10 + HOLD_WINDOW).is_empty());
    classic.repeat(Key::Right, 20);
    assert!(classic.expire(20 + HOLD_WINDOW).is_empty());
    assert_eq!(
        classic.expire(21 + HOLD_WINDOW),
        vec![InputEvent::KeyUp(Key::Right)]
    );
    assert!(!classic.is_held(Key::Right));

    let mut enhanced = HeldKeys::new(false);
    enhanced.press(Key::Right, 10);
    assert!(enhanced.expire(1_000).is_empty());
    assert!(enhanced.is_held(Key::Right));
}

// ── Keymap file ───────────────────────────────────────────────────────────────

#[test]
fn default_keymap_is_ps4_layout() {
    let keymap = ControllerKeymap::default();
    assert_eq!(keymap.len(), 16);
    assert_eq!(keymap.action_for(0), Some(ButtonAction::Fire));
    assert_eq!(keymap.action_for(6), Some(ButtonAction::Play));
    assert_eq!(keymap.action_for(13), Some(ButtonAction::MoveLeft));
    assert_eq!(keymap.action_for(14), Some(ButtonAction::MoveRight));
    assert_eq!(keymap.action_for(16), None);
}

#[test]
fn keymap_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.json");
    fs::write(&path, r#"{ "trigger": 3, "left_arrow": 7 }"#).unwrap();

    let keymap = ControllerKeymap::load(&path).unwrap();
    assert_eq!(keymap.len(), 2);
    assert_eq!(keymap.action_for(3), Some(ButtonAction::Fire));
    assert_eq!(keymap.action_for(7), Some(ButtonAction::MoveLeft));
    assert_eq!(keymap.action_for(0), None);
}

#[test]
fn missing_keymap_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(ControllerKeymap::load(&path).is_err());
    assert_eq!(ControllerKeymap::load_or_default(&path), ControllerKeymap::default());
}

#[test]
fn malformed_keymap_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ControllerKeymap::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
    assert_eq!(ControllerKeymap::load_or_default(&path), ControllerKeymap::default());
}
