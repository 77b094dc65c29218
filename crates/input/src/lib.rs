//! Keyboard input handling and the flight-control contract.
//!
//! [`InputState`] tracks raw key state between frames; [`KeyBindings`] maps
//! keys onto named [`ControlAxis`] values so the simulation only ever sees a
//! [`ControlState`] snapshot.

mod controls;

pub use controls::*;

use std::collections::{HashMap, HashSet};

/// Manages keyboard state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    log::trace!("key down {:?}", key);
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                log::trace!("key up {:?}", key);
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Drop every held key (e.g. when the window loses focus).
    pub fn release_all(&mut self) {
        self.keys_released.extend(self.keys_held.drain());
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Build the level-triggered control snapshot for this frame.
    pub fn controls(&self, bindings: &KeyBindings) -> ControlState {
        let mut state = ControlState::idle();
        for axis in ControlAxis::ALL {
            let held = bindings.keys(axis).iter().any(|&k| self.is_key_held(k));
            state.set(axis, held);
        }
        state
    }

    /// Check if interact was pressed this frame (edge-triggered).
    pub fn is_interact_pressed(&self, bindings: &KeyBindings) -> bool {
        bindings.interact.iter().any(|&k| self.is_key_pressed(k))
    }
}

/// Key assignment for each control axis plus the interact action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    axes: HashMap<ControlAxis, Vec<KeyCode>>,
    pub interact: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let axes = HashMap::from([
            (ControlAxis::TurnLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]),
            (ControlAxis::TurnRight, vec![KeyCode::KeyD, KeyCode::ArrowRight]),
            (ControlAxis::PitchUp, vec![KeyCode::KeyW, KeyCode::ArrowUp]),
            // S is taken by warp, so pitch-down lives on X.
            (ControlAxis::PitchDown, vec![KeyCode::KeyX, KeyCode::ArrowDown]),
            (ControlAxis::Thrust, vec![KeyCode::Space]),
            (ControlAxis::Brake, vec![KeyCode::ShiftLeft]),
            (ControlAxis::Warp, vec![KeyCode::KeyS]),
        ]);
        Self {
            axes,
            interact: vec![KeyCode::KeyE, KeyCode::Enter],
        }
    }
}

impl KeyBindings {
    /// Keys bound to `axis` (empty if unbound).
    pub fn keys(&self, axis: ControlAxis) -> &[KeyCode] {
        self.axes.get(&axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the keys bound to `axis`.
    pub fn bind(&mut self, axis: ControlAxis, keys: Vec<KeyCode>) {
        self.axes.insert(axis, keys);
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_map_to_controls() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        let controls = input.controls(&bindings);
        assert!(controls.is_held(ControlAxis::Thrust));
        assert!(controls.is_held(ControlAxis::TurnLeft));
        assert!(!controls.is_held(ControlAxis::Warp));

        // Still held on the next frame: level-triggered.
        input.begin_frame();
        assert_eq!(input.controls(&bindings), controls);

        input.process_keyboard(KeyCode::Space, ElementState::Released);
        assert!(!input.controls(&bindings).is_held(ControlAxis::Thrust));
    }

    #[test]
    fn interact_is_edge_triggered() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        assert!(input.is_interact_pressed(&bindings));
        input.begin_frame();
        // Key repeat while held does not re-trigger.
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        assert!(!input.is_interact_pressed(&bindings));
    }

    #[test]
    fn rebinding_replaces_keys() {
        let mut bindings = KeyBindings::default();
        bindings.bind(ControlAxis::Warp, vec![KeyCode::KeyQ]);
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        assert!(!input.controls(&bindings).is_held(ControlAxis::Warp));
        input.process_keyboard(KeyCode::KeyQ, ElementState::Pressed);
        assert!(input.controls(&bindings).is_held(ControlAxis::Warp));
    }

    #[test]
    fn release_all_clears_controls() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        input.release_all();
        assert!(input.controls(&bindings).is_idle());
        assert!(input.is_key_released(KeyCode::KeyS));
    }
}
