/// Input vocabulary shared by every front end, plus the two pieces of input
/// processing that are independent of the device library: analog steering
/// and held-key tracking.

use std::collections::HashMap;

/// Logical keys.  Front ends map physical keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Left,
    Right,
    Fire,
    Play,
    Quit,
}

/// One discrete input event, already in logical screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Primary pointer button pressed at logical pixel (x, y).
    Click { x: i32, y: i32 },
    /// Analog axis moved. Axis 0 is the left stick's horizontal.
    Axis { axis: usize, value: f32 },
    ControllerButtonDown(u32),
    ControllerButtonUp(u32),
    /// Window closed or terminal hung up.
    Quit,
}

/// What the loop should do after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

// ── Analog steering ───────────────────────────────────────────────────────────

/// Inside this magnitude the stick counts as centred and releases steering.
pub const AXIS_DEAD_ZONE: f32 = 0.4;
/// Beyond this magnitude the stick engages steering in its direction.
pub const AXIS_ENGAGE: f32 = 0.7;

pub const AXIS_COUNT: usize = 6;
pub const STEERING_AXIS: usize = 0;

/// Last reported value of every controller axis.  Triggers rest at -1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalogAxes {
    pub values: [f32; AXIS_COUNT],
}

impl Default for AnalogAxes {
    fn default() -> Self {
        AnalogAxes { values: [0.0, 0.0, 0.0, 0.0, -1.0, -1.0] }
    }
}

impl AnalogAxes {
    /// Record an axis value.  Unknown axes are ignored.
    pub fn set(&mut self, axis: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(axis) {
            *slot = value;
        }
    }

    pub fn steering_value(&self) -> f32 {
        self.values[STEERING_AXIS]
    }
}

/// `(moving_left, moving_right)` for a steering axis value.
///
/// Only a stick pushed past the engage threshold steers; anything short of
/// it, dead zone included, releases both directions.
pub fn steer(value: f32) -> (bool, bool) {
    if value.abs() <= AXIS_DEAD_ZONE {
        (false, false)
    } else if value < -AXIS_ENGAGE {
        (true, false)
    } else if value > AXIS_ENGAGE {
        (false, true)
    } else {
        (false, false)
    }
}

// ── Held keys ─────────────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  Must outlast the OS initial repeat delay (up to ~500 ms), which
/// is 30 frames at 60 FPS.
pub const HOLD_WINDOW: u64 = 30;

/// Turns raw press/repeat/release notifications into `KeyDown`/`KeyUp`.
///
/// Terminals with release reporting deliver proper releases.  Classic
/// terminals only repeat presses, so with `expire_silent` a key that stops
/// repeating for longer than `HOLD_WINDOW` frames gets a synthetic `KeyUp`.
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, u64>,
    expire_silent: bool,
}

impl HeldKeys {
    pub fn new(expire_silent: bool) -> Self {
        HeldKeys { last_seen: HashMap::new(), expire_silent }
    }

    /// A fresh press.  Every press is dispatched, so auto-repeated presses
    /// keep firing.
    pub fn press(&mut self, key: Key, frame: u64) -> InputEvent {
        self.last_seen.insert(key, frame);
        InputEvent::KeyDown(key)
    }

    /// A repeat notification: keeps the key alive without a new `KeyDown`.
    pub fn repeat(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    pub fn release(&mut self, key: Key) -> Option<InputEvent> {
        self.last_seen.remove(&key).map(|_| InputEvent::KeyUp(key))
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }

    /// Release every key that went silent.  No-op without `expire_silent`.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        if !self.expire_silent {
            return Vec::new();
        }
        let mut stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        stale.sort();
        stale
            .into_iter()
            .filter_map(|key| self.release(key))
            .collect()
    }
}
