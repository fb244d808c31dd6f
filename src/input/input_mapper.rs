//! Input mapping from decoded button state to semantic actions
//!
//! Maps special keys to high-level actions like Exit, ResetSimulation, etc.
//! Movement keys (WASD, QE) are NOT mapped here - they go directly to CameraController.

use phys3d_input::{Input, InputButton};

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Put every body back at its spawn point (R key)
    ResetSimulation,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Cycle normal -> borderless -> fullscreen (B key)
    CycleWindowStyle,
    /// Toggle vertical sync (V key)
    ToggleVsync,
    /// Toggle input smoothing (G key)
    ToggleSmoothing,
}

const BINDINGS: [(InputButton, InputAction); 6] = [
    (InputButton::ESCAPE, InputAction::Exit),
    (InputButton::R, InputAction::ResetSimulation),
    (InputButton::F, InputAction::ToggleFullscreen),
    (InputButton::B, InputAction::CycleWindowStyle),
    (InputButton::V, InputAction::ToggleVsync),
    (InputButton::G, InputAction::ToggleSmoothing),
];

/// Maps button state to actions
///
/// An action fires once on the frame its key goes down; holding the key does
/// not repeat it.
#[derive(Debug, Default)]
pub struct InputMapper {
    held: [bool; BINDINGS.len()],
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the actions whose keys were pressed since the last call
    pub fn map(&mut self, input: &Input) -> Vec<InputAction> {
        let mut actions = Vec::new();

        for (held, (button, action)) in self.held.iter_mut().zip(BINDINGS) {
            let down = input.is_down(button);
            if down && !*held {
                actions.push(action);
            }
            *held = down;
        }

        actions
    }

    /// Forget held keys, e.g. after focus loss
    pub fn reset(&mut self) {
        self.held = [false; BINDINGS.len()];
    }
}
