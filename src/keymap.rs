/// Controller button mapping, loaded once at startup from a JSON file of
/// `"name": index` pairs (PS4 layout by default).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What a controller button does in game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Fire,
    MoveLeft,
    MoveRight,
    Play,
}

const LEFT_NAME: &str = "left_arrow";
const RIGHT_NAME: &str = "right_arrow";
const PLAY_NAME: &str = "options";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControllerKeymap {
    buttons: BTreeMap<String, u32>,
}

impl Default for ControllerKeymap {
    fn default() -> Self {
        let layout = [
            ("x", 0),
            ("circle", 1),
            ("square", 2),
            ("triangle", 3),
            ("share", 4),
            ("PS", 5),
            ("options", 6),
            ("left_stick_click", 7),
            ("right_stick_click", 8),
            ("L1", 9),
            ("R1", 10),
            ("up_arrow", 11),
            ("down_arrow", 12),
            ("left_arrow", 13),
            ("right_arrow", 14),
            ("touchpad", 15),
        ];
        ControllerKeymap {
            buttons: layout
                .into_iter()
                .map(|(name, id)| (name.to_string(), id))
                .collect(),
        }
    }
}

impl ControllerKeymap {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid controller keymap JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read keymap {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in keymap {}", path.display()))
    }

    /// Load the keymap, falling back to the built-in layout when the file is
    /// missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(map) => {
                tracing::info!(path = %path.display(), buttons = map.len(), "loaded controller keymap");
                map
            }
            Err(err) => {
                tracing::warn!("{err:#}; using default controller layout");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.buttons.get(name).copied()
    }

    /// Arrows steer, `options` starts a game, every other mapped button
    /// fires.  Unmapped ids do nothing.
    pub fn action_for(&self, id: u32) -> Option<ButtonAction> {
        let (name, _) = self.buttons.iter().find(|(_, &mapped)| mapped == id)?;
        let action = match name.as_str() {
            LEFT_NAME => ButtonAction::MoveLeft,
            RIGHT_NAME => ButtonAction::MoveRight,
            PLAY_NAME => ButtonAction::Play,
            _ => ButtonAction::Fire,
        };
        Some(action)
    }
}
