//! # lockstep_sim - The simulation loop
//!
//! One [`Simulation`] owns the entity registry, the physics bridge, the
//! persistent gameplay state, and the active physics world, and advances
//! them once per external frame callback. Physics time moves in fixed
//! 1/60 s quanta behind an accumulator, so a single callback may perform
//! zero, one, or several physics steps while input sampling and render
//! submission happen exactly once.
//!
//! Everything is single-threaded and cooperatively scheduled; the only
//! ordering rule that matters is baked into [`Simulation::frame`]:
//! transforms are resynced from physics before any trigger evaluation
//! reads a position.

pub mod config;
pub mod error;
pub mod input;
pub mod messages;
pub mod render;
pub mod simulation;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use input::{Button, InputSource, InputState};
pub use messages::{MessageChannel, Presentation};
pub use render::Renderer;
pub use simulation::{EngineFactory, RunState, Simulation};
