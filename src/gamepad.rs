/// Optional controller input.
///
/// With the `gamepad` feature, events come from gilrs and are translated into
/// the game's SDL-style indices (the layout the keymap file uses).  Without
/// it, or when no controller backend is available, the source stays silent
/// and the game runs on keyboard and mouse.

#[cfg(feature = "gamepad")]
mod backend {
    use gilrs::{Axis, Button, EventType, Gilrs};

    use alien_invasion::input::InputEvent;

    pub struct GamepadSource {
        gilrs: Option<Gilrs>,
    }

    impl GamepadSource {
        pub fn connect() -> Self {
            match Gilrs::new() {
                Ok(gilrs) => {
                    let count = gilrs.gamepads().count();
                    tracing::info!(count, "controller backend ready");
                    GamepadSource { gilrs: Some(gilrs) }
                }
                Err(err) => {
                    tracing::info!("controller unavailable ({err}); keyboard and mouse only");
                    GamepadSource { gilrs: None }
                }
            }
        }

        pub fn poll(&mut self) -> Vec<InputEvent> {
            let Some(gilrs) = self.gilrs.as_mut() else {
                return Vec::new();
            };
            let mut events = Vec::new();
            while let Some(gilrs::Event { event, .. }) = gilrs.next_event() {
                match event {
                    EventType::AxisChanged(axis, value, _) => {
                        if let Some(axis) = axis_index(axis) {
                            events.push(InputEvent::Axis { axis, value });
                        }
                    }
                    EventType::ButtonPressed(button, _) => {
                        if let Some(id) = button_index(button) {
                            events.push(InputEvent::ControllerButtonDown(id));
                        }
                    }
                    EventType::ButtonReleased(button, _) => {
                        if let Some(id) = button_index(button) {
                            events.push(InputEvent::ControllerButtonUp(id));
                        }
                    }
                    EventType::Disconnected => tracing::info!("controller disconnected"),
                    EventType::Connected => tracing::info!("controller connected"),
                    _ => {}
                }
            }
            events
        }
    }

    fn axis_index(axis: Axis) -> Option<usize> {
        match axis {
            Axis::LeftStickX => Some(0),
            Axis::LeftStickY => Some(1),
            Axis::RightStickX => Some(2),
            Axis::RightStickY => Some(3),
            Axis::LeftZ => Some(4),
            Axis::RightZ => Some(5),
            _ => None,
        }
    }

    fn button_index(button: Button) -> Option<u32> {
        let id = match button {
            Button::South => 0,
            Button::East => 1,
            Button::West => 2,
            Button::North => 3,
            Button::Select => 4,
            Button::Mode => 5,
            Button::Start => 6,
            Button::LeftThumb => 7,
            Button::RightThumb => 8,
            Button::LeftTrigger => 9,
            Button::RightTrigger => 10,
            Button::DPadUp => 11,
            Button::DPadDown => 12,
            Button::DPadLeft => 13,
            Button::DPadRight => 14,
            _ => return None,
        };
        Some(id)
    }
}

#[cfg(not(feature = "gamepad"))]
mod backend {
    use alien_invasion::input::InputEvent;

    pub struct GamepadSource;

    impl GamepadSource {
        pub fn connect() -> Self {
            tracing::info!("built without controller support; keyboard and mouse only");
            GamepadSource
        }

        pub fn poll(&mut self) -> Vec<InputEvent> {
            Vec::new()
        }
    }
}

pub use backend::GamepadSource;
