//! Simulation tuning constants

use serde::{Deserialize, Serialize};

/// Tuning for the frame state machine. Defaults match the shipped game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Physics advances in quanta of this size
    pub fixed_timestep: f32,
    /// Incoming frame deltas are clamped to this before accumulation, so a
    /// stalled tab can only trigger a bounded catch-up burst
    pub max_frame_delta: f32,
    /// Horizontal speed each held direction contributes
    pub move_speed: f32,
    /// Vertical velocity applied on a grounded jump
    pub jump_speed: f32,
    /// Half height of the player's box body
    pub player_half_height: f32,
    /// Vertical distance tolerance for the grounded heuristic
    pub grounded_tolerance: f32,
    /// Upward-velocity tolerance for the grounded heuristic
    pub grounded_velocity_tolerance: f32,
    /// Cosmetic spin rate for collectibles and the win marker (rad/s)
    pub spin_rate: f32,
    /// How long the "press to interact" prompt stays up
    pub prompt_duration: f32,
    /// How long interaction-result messages stay up
    pub result_duration: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_frame_delta: 0.1,
            move_speed: 6.0,
            jump_speed: 7.0,
            player_half_height: 0.5,
            grounded_tolerance: 0.05,
            grounded_velocity_tolerance: 0.1,
            spin_rate: 2.0,
            prompt_duration: 1.0,
            result_duration: 2.0,
        }
    }
}

impl SimConfig {
    /// Set the fixed physics timestep
    pub fn with_fixed_timestep(mut self, fixed_timestep: f32) -> Self {
        self.fixed_timestep = fixed_timestep;
        self
    }

    /// Set the frame-delta clamp
    pub fn with_max_frame_delta(mut self, max_frame_delta: f32) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    /// Set the movement speed
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }
}
