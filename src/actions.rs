//! Host-facing input actions.

use voidharvest_core::{Entity, World};

use crate::components::Input;

/// Translated input action delivered by the host each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// No input this tick; clears movement state.
    None,
    /// Quit request.
    Quit,
    /// Move left.
    MoveLeft,
    /// Move right.
    MoveRight,
    /// Move up.
    MoveUp,
    /// Move down.
    MoveDown,
    /// Confirm.
    Enter,
    /// Write the autosave file.
    SaveAuto,
    /// Write the compressed autosave file.
    SaveCompressed,
    /// Write slot 1.
    SaveSlot1,
    /// Write slot 2.
    SaveSlot2,
    /// Write slot 3.
    SaveSlot3,
    /// Menu cursor up.
    MenuUp,
    /// Menu cursor down.
    MenuDown,
    /// Menu cursor left.
    MenuLeft,
    /// Menu cursor right.
    MenuRight,
    /// Menu confirm.
    MenuSelect,
    /// Menu back.
    MenuBack,
    /// Toggle the debug overlay.
    DebugToggle,
}

impl HostAction {
    /// Parses the key names used by the simulator script format.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "left" => Self::MoveLeft,
            "right" => Self::MoveRight,
            "up" => Self::MoveUp,
            "down" => Self::MoveDown,
            "enter" => Self::Enter,
            "quit" => Self::Quit,
            _ => Self::None,
        }
    }
}

/// Applies a host action to a designated entity's input component.
///
/// Movement actions set exactly one direction; anything that is not
/// entity input (menu navigation, saves, debug toggling) resets the
/// component so a stale direction never carries across a menu
/// interaction.
pub fn apply_action(world: &World, entity: Entity, action: HostAction) {
    let mut input = world.get::<Input>(entity).unwrap_or_default();
    match action {
        HostAction::MoveLeft => {
            input = Input {
                left: true,
                ..Input::default()
            };
        }
        HostAction::MoveRight => {
            input = Input {
                right: true,
                ..Input::default()
            };
        }
        HostAction::MoveUp => {
            input = Input {
                up: true,
                ..Input::default()
            };
        }
        HostAction::MoveDown => {
            input = Input {
                down: true,
                ..Input::default()
            };
        }
        HostAction::Enter => {
            input = Input {
                enter: true,
                ..Input::default()
            };
        }
        _ => input = Input::default(),
    }
    world.insert(entity, input);
}
