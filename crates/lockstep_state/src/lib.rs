//! # lockstep_state - Persistent gameplay state
//!
//! State that outlives a single scene instance: the single-slot key
//! inventory and the authoritative key/door progress flags. A scene
//! transition never clears any of this; it is reset only at process start.
//!
//! Nothing in here is ambient or static. The top-level simulation owns one
//! [`PersistentState`] and threads it into scene building and interaction
//! resolution as a parameter, which keeps every rule testable without a
//! live global.

pub mod inventory;
pub mod progress;
pub mod state;

pub use inventory::{Inventory, KeyColor};
pub use progress::{DoorFlag, KeyFlag};
pub use state::PersistentState;
