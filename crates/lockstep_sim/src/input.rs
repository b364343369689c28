//! Logical-button input
//!
//! The simulation consumes level-triggered "is held" and edge-triggered
//! "was pressed this frame" queries over a fixed button vocabulary.
//! Debouncing and raw event capture stay upstream; [`InputState`] is the
//! canonical edge-tracking implementation fed by whatever device layer
//! the embedder wires up.

use std::collections::HashSet;

/// The fixed vocabulary of logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Jump,
    Interact,
}

/// Input queries the simulation loop runs each frame. `end_frame` is
/// invoked by the loop as its final step to clear press edges.
pub trait InputSource {
    /// Level-triggered: is the button currently held
    fn is_held(&self, button: Button) -> bool;

    /// Edge-triggered: did the button go down since the last `end_frame`
    fn was_pressed(&self, button: Button) -> bool;

    /// Clear press edges for the next frame
    fn end_frame(&mut self);
}

/// Edge-tracking button state
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Button>,
    pressed: HashSet<Button>,
}

impl InputState {
    /// Create with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a button-down event. Repeated downs while held do not
    /// re-trigger the press edge.
    pub fn press(&mut self, button: Button) {
        if self.held.insert(button) {
            self.pressed.insert(button);
        }
    }

    /// Feed a button-up event
    pub fn release(&mut self, button: Button) {
        self.held.remove(&button);
    }
}

impl InputSource for InputState {
    fn is_held(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn end_frame(&mut self) {
        self.pressed.clear();
    }
}
