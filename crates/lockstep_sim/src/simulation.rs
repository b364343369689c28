//! The per-frame state machine and scene lifecycle

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::input::{Button, InputSource};
use crate::messages::{MessageChannel, Presentation};
use crate::render::Renderer;
use lockstep_ecs::{Entity, Interactable, MeshHandle, Registry};
use lockstep_math::Vec3;
use lockstep_physics::{PhysicsBridge, PhysicsEngine};
use lockstep_scene::{self as scene, BuildSettings, MeshSet, SceneDescriptor};
use lockstep_state::PersistentState;

/// Factory for fresh physics world instances; invoked once per scene
pub type EngineFactory = Box<dyn FnMut() -> Box<dyn PhysicsEngine>>;

/// Coarse run state. `stop` transitions to `Stopped`; no further frames are
/// processed after that, and there is no mid-frame cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Frames advance the simulation
    Running,
    /// Final scene completed; terminal
    Victory,
    /// Explicitly stopped; terminal
    Stopped,
}

/// The simulation loop. Owns every mutable piece of game state and advances
/// it once per external frame callback with a variable `dt`.
pub struct Simulation {
    config: SimConfig,
    settings: BuildSettings,
    meshes: MeshSet,
    scenes: Vec<SceneDescriptor>,
    scene_index: usize,
    state: PersistentState,
    registry: Registry,
    bridge: PhysicsBridge,
    engine: Box<dyn PhysicsEngine>,
    engine_factory: EngineFactory,
    player: Entity,
    accumulator: f32,
    player_grounded: bool,
    messages: MessageChannel,
    run_state: RunState,
}

impl Simulation {
    /// Validate the scene set, build the first scene, and return a running
    /// simulation. Configuration errors here are fatal by design: the loop
    /// never starts against an inconsistent registry.
    pub fn new(
        scenes: Vec<SceneDescriptor>,
        config: SimConfig,
        settings: BuildSettings,
        meshes: MeshSet,
        mut engine_factory: EngineFactory,
    ) -> Result<Self> {
        if scenes.is_empty() {
            return Err(SimError::NoScenes);
        }
        scene::validate_scene_set(&scenes)?;

        let mut state = PersistentState::new();
        let mut registry = Registry::new();
        let mut bridge = PhysicsBridge::new();
        let mut engine = engine_factory();

        let built = scene::build(
            &scenes[0],
            &settings,
            &meshes,
            &mut state,
            engine.as_mut(),
            &mut bridge,
            &mut registry,
        )?;

        Ok(Self {
            config,
            settings,
            meshes,
            scenes,
            scene_index: 0,
            state,
            registry,
            bridge,
            engine,
            engine_factory,
            player: built.player,
            accumulator: 0.0,
            player_grounded: false,
            messages: MessageChannel::new(),
            run_state: RunState::Running,
        })
    }

    /// Current run state
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Stop the loop; later frames are no-ops
    pub fn stop(&mut self) {
        self.run_state = RunState::Stopped;
    }

    /// Index of the active scene
    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    /// The controlled entity
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Grounded flag from the last frame's heuristic
    pub fn is_grounded(&self) -> bool {
        self.player_grounded
    }

    /// Fixed-step accumulator remainder, always in `[0, fixed_timestep)`
    /// after a frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// The entity registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The entity registry, mutable (embedder glue and tests)
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Persistent gameplay state
    pub fn state(&self) -> &PersistentState {
        &self.state
    }

    /// The message channel
    pub fn messages(&self) -> &MessageChannel {
        &self.messages
    }

    /// Advance one frame. `dt` is the wall-clock interval since the last
    /// callback; it is clamped before accumulation so a stall can only
    /// trigger a bounded number of catch-up physics steps.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        presentation: &mut dyn Presentation,
    ) -> Result<()> {
        if self.run_state != RunState::Running {
            return Ok(());
        }

        let dt = dt.clamp(0.0, self.config.max_frame_delta);
        self.messages.update(dt);

        // A player without a body is a transient inconsistency: skip this
        // frame's simulation work and retry next frame.
        if !self.bridge.is_bound(self.player) {
            log::warn!("player {} has no physics body; frame skipped", self.player);
            return Ok(());
        }

        // 1-2: compose the velocity intent. Held directions set horizontal
        // components directly (no acceleration model); vertical velocity is
        // preserved from physics unless a grounded jump replaces it.
        let mut velocity = self.bridge.velocity(self.engine.as_ref(), self.player)?;
        let axis = |neg: Button, pos: Button, input: &dyn InputSource| {
            let mut v = 0.0;
            if input.is_held(neg) {
                v -= 1.0;
            }
            if input.is_held(pos) {
                v += 1.0;
            }
            v
        };
        velocity.x = axis(Button::MoveLeft, Button::MoveRight, input) * self.config.move_speed;
        velocity.z = axis(Button::MoveUp, Button::MoveDown, input) * self.config.move_speed;
        if input.was_pressed(Button::Jump) && self.player_grounded {
            velocity.y = self.config.jump_speed;
        }

        // 3: push the intent to the engine
        self.bridge
            .set_velocity(self.engine.as_mut(), self.player, velocity)?;

        // 4: fixed-step physics behind the accumulator
        self.accumulator += dt;
        while self.accumulator >= self.config.fixed_timestep {
            self.engine.step();
            self.accumulator -= self.config.fixed_timestep;
        }

        // 5: resync transforms before anything reads positions
        self.bridge
            .sync_transforms(self.engine.as_ref(), &mut self.registry.transforms);

        let Some(player_pos) = self.registry.transforms.get(self.player).map(|t| t.position())
        else {
            log::warn!("player {} has no transform; frame skipped", self.player);
            return Ok(());
        };

        // 6: grounded heuristic - near any platform top and not moving up
        let vertical_velocity = self.bridge.velocity(self.engine.as_ref(), self.player)?.y;
        let foot_target = |top: f32| top + self.config.player_half_height;
        self.player_grounded = vertical_velocity <= self.config.grounded_velocity_tolerance
            && self
                .registry
                .platforms
                .iter()
                .any(|(_, p)| {
                    (player_pos.y - foot_target(p.top_surface_y)).abs()
                        <= self.config.grounded_tolerance
                });

        // 7: cosmetic spin for live collectibles and the win marker
        let spin = Vec3::new(0.0, self.config.spin_rate * dt, 0.0);
        let spinning: Vec<Entity> = self
            .registry
            .collectibles
            .iter()
            .filter(|(_, c)| !c.collected)
            .map(|(e, _)| e)
            .chain(
                self.registry
                    .win_conditions
                    .iter()
                    .filter(|(_, w)| !w.completed)
                    .map(|(e, _)| e),
            )
            .collect();
        for entity in spinning {
            if let Some(transform) = self.registry.transforms.get_mut(entity) {
                transform.rotate(spin);
            }
        }

        // 8: collectible pickup (idempotent, scene-local)
        let picked: Vec<Entity> = self
            .registry
            .collectibles
            .iter()
            .filter(|(e, c)| !c.collected && self.within(*e, player_pos, c.trigger_radius))
            .map(|(e, _)| e)
            .collect();
        for entity in picked {
            if let Some(collectible) = self.registry.collectibles.get_mut(entity) {
                collectible.collected = true;
            }
        }

        // 9: interactable proximity and action
        let nearby: Vec<(Entity, Interactable)> = self
            .registry
            .interactables
            .iter()
            .filter(|(e, i)| self.within(*e, player_pos, i.trigger_radius()))
            .map(|(e, i)| (e, i.clone()))
            .collect();
        if !nearby.is_empty() {
            self.messages
                .request(presentation, "Press E to interact", self.config.prompt_duration);
        }
        if input.was_pressed(Button::Interact) {
            for (entity, interactable) in nearby {
                self.resolve_interaction(entity, interactable, presentation);
            }
        }

        // 10: win evaluation, gated on full collection and the completed flag
        let all_collected = self.registry.collectibles.iter().all(|(_, c)| c.collected);
        if all_collected {
            let triggered = self
                .registry
                .win_conditions
                .iter()
                .find(|(e, w)| !w.completed && self.within(*e, player_pos, w.trigger_radius))
                .map(|(e, _)| e);
            if let Some(entity) = triggered {
                if let Some(win) = self.registry.win_conditions.get_mut(entity) {
                    win.completed = true;
                }
                self.advance_scene(presentation)?;
            }
        }

        // 11: render submission, ordered by entity id; consumed pickups and
        // completed win markers stay out of the draw list
        let mut draws: Vec<(Entity, MeshHandle)> = self
            .registry
            .renderables
            .iter()
            .filter(|(e, _)| {
                self.registry.collectibles.get(*e).map_or(true, |c| !c.collected)
                    && self.registry.win_conditions.get(*e).map_or(true, |w| !w.completed)
            })
            .map(|(e, r)| (e, r.mesh))
            .collect();
        draws.sort_by_key(|(e, _)| *e);
        for (entity, mesh) in draws {
            if let Some(transform) = self.registry.transforms.get(entity) {
                renderer.submit(mesh, transform.matrix());
            }
        }

        // 12: clear press edges for the next frame
        input.end_frame();
        Ok(())
    }

    fn within(&self, entity: Entity, from: Vec3, radius: f32) -> bool {
        self.registry
            .transforms
            .get(entity)
            .map(|t| t.position().distance(from) < radius)
            .unwrap_or(false)
    }

    /// Dispatch an interaction on the variant tag
    fn resolve_interaction(
        &mut self,
        entity: Entity,
        interactable: Interactable,
        presentation: &mut dyn Presentation,
    ) {
        match interactable {
            Interactable::Key { id, color, .. } => {
                self.state.collect_key(&id);
                // The entity stays allocated but inert
                self.registry.renderables.remove(entity);
                self.registry.interactables.remove(entity);
                self.messages.force(
                    presentation,
                    &format!("Picked up the {color} key"),
                    self.config.result_duration,
                );
            }
            Interactable::Door { id, color, .. } => {
                if self.state.inventory.holds(color) && !self.state.door_open(&id) {
                    self.state.open_door(&id);
                    self.bridge.detach(entity, self.engine.as_mut());
                    self.registry.renderables.remove(entity);
                    self.registry.interactables.remove(entity);
                    self.messages.force(
                        presentation,
                        &format!("The {color} door opens"),
                        self.config.result_duration,
                    );
                } else {
                    // Wrong or missing key: a normal outcome, not a fault
                    self.messages.force(
                        presentation,
                        &format!("You need the {color} key"),
                        self.config.result_duration,
                    );
                }
            }
        }
    }

    /// Tear down the current scene and build the next, or signal victory
    /// when none remain. Persistent state is never cleared here.
    fn advance_scene(&mut self, presentation: &mut dyn Presentation) -> Result<()> {
        self.scene_index += 1;
        if self.scene_index < self.scenes.len() {
            log::info!("scene complete; advancing to scene {}", self.scene_index);
            self.bridge.detach_all(self.engine.as_mut());
            self.registry.clear();
            self.engine = (self.engine_factory)();
            self.accumulator = 0.0;
            self.player_grounded = false;

            let built = scene::build(
                &self.scenes[self.scene_index],
                &self.settings,
                &self.meshes,
                &mut self.state,
                self.engine.as_mut(),
                &mut self.bridge,
                &mut self.registry,
            )?;
            self.player = built.player;
        } else {
            log::info!("final scene complete");
            self.run_state = RunState::Victory;
            self.messages
                .force(presentation, "You win!", self.config.result_duration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use lockstep_math::Mat4;
    use lockstep_physics::{BodyDesc, BodyHandle, PhysicsError};
    use std::collections::HashMap;

    /// Frictionless, gravityless kinematic stub: dynamic bodies integrate
    /// velocity at 1/60 s per step, nothing collides.
    #[derive(Default)]
    struct StubEngine {
        bodies: HashMap<u64, (Vec3, Vec3, bool)>,
        next: u64,
        steps: usize,
    }

    impl PhysicsEngine for StubEngine {
        fn create_body(&mut self, desc: &BodyDesc) -> lockstep_physics::Result<BodyHandle> {
            let handle = BodyHandle(self.next);
            self.next += 1;
            self.bodies
                .insert(handle.0, (desc.position, Vec3::ZERO, desc.dynamic));
            Ok(handle)
        }

        fn remove_body(&mut self, handle: BodyHandle) {
            self.bodies.remove(&handle.0);
        }

        fn step(&mut self) {
            self.steps += 1;
            for (pos, vel, dynamic) in self.bodies.values_mut() {
                if *dynamic {
                    *pos += *vel * (1.0 / 60.0);
                }
            }
        }

        fn position(&self, handle: BodyHandle) -> lockstep_physics::Result<Vec3> {
            self.bodies
                .get(&handle.0)
                .map(|(p, _, _)| *p)
                .ok_or(PhysicsError::BodyNotFound(handle))
        }

        fn linear_velocity(&self, handle: BodyHandle) -> lockstep_physics::Result<Vec3> {
            self.bodies
                .get(&handle.0)
                .map(|(_, v, _)| *v)
                .ok_or(PhysicsError::BodyNotFound(handle))
        }

        fn set_linear_velocity(
            &mut self,
            handle: BodyHandle,
            velocity: Vec3,
        ) -> lockstep_physics::Result<()> {
            self.bodies
                .get_mut(&handle.0)
                .map(|(_, v, _)| *v = velocity)
                .ok_or(PhysicsError::BodyNotFound(handle))
        }
    }

    struct NullRenderer;
    impl Renderer for NullRenderer {
        fn submit(&mut self, _mesh: MeshHandle, _world: Mat4) {}
    }

    #[derive(Default)]
    struct NullPresentation;
    impl Presentation for NullPresentation {
        fn show_message(&mut self, _text: &str, _duration: f32) {}
    }

    fn simple_scene() -> SceneDescriptor {
        SceneDescriptor::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(20.0, 0.5, 0.0))
    }

    fn new_sim(scenes: Vec<SceneDescriptor>) -> Simulation {
        Simulation::new(
            scenes,
            SimConfig::default(),
            BuildSettings::default(),
            MeshSet::sequential(),
            Box::new(|| Box::<StubEngine>::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_scene_list_is_fatal() {
        let result = Simulation::new(
            Vec::new(),
            SimConfig::default(),
            BuildSettings::default(),
            MeshSet::sequential(),
            Box::new(|| Box::<StubEngine>::default()),
        );
        assert!(matches!(result, Err(SimError::NoScenes)));
    }

    #[test]
    fn test_accumulator_remainder_invariant() {
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();

        for dt in [0.016, 0.021, 0.005, 0.09, 0.033] {
            sim.frame(dt, &mut input, &mut NullRenderer, &mut NullPresentation)
                .unwrap();
            let rem = sim.accumulator();
            assert!(
                (0.0..sim.config.fixed_timestep).contains(&rem),
                "remainder {rem} out of range after dt {dt}"
            );
        }
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        // A 500 ms stall is clamped to max_frame_delta before accumulation:
        // at most ~6 catch-up steps run instead of 30
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();
        input.press(Button::MoveRight);

        sim.frame(0.5, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();

        let x = sim
            .registry()
            .transforms
            .get(sim.player())
            .unwrap()
            .position()
            .x;
        // 6 m/s for at most 0.1 s of simulated time
        assert!(x <= 0.61, "player drifted to {x}, stall was not clamped");
        assert!(x >= 0.4);
        assert!(sim.accumulator() < sim.config.fixed_timestep);
    }

    #[test]
    fn test_missing_player_body_skips_frame() {
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();

        let player = sim.player();
        sim.bridge.detach(player, sim.engine.as_mut());

        // Frame is skipped, not fatal, and the accumulator does not grow
        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        assert_eq!(sim.accumulator(), 0.0);
        assert_eq!(sim.run_state(), RunState::Running);
    }

    #[test]
    fn test_grounded_on_floor() {
        // Player spawns with feet exactly on the floor (half height 0.5)
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();

        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        assert!(sim.is_grounded());
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();

        // Frame 1 establishes grounded state
        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        assert!(sim.is_grounded());

        // Jump edge while grounded: player leaves the floor
        input.press(Button::Jump);
        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        let y_after_jump = sim.registry().transforms.get(sim.player()).unwrap().position().y;
        assert!(y_after_jump > 0.5);
        assert!(!sim.is_grounded());

        // A second press mid-air is dropped, not buffered
        input.release(Button::Jump);
        input.press(Button::Jump);
        let body = sim.bridge.handle(sim.player()).unwrap();
        let vy_before = sim.engine.linear_velocity(body).unwrap().y;
        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        let vy_after = sim.engine.linear_velocity(body).unwrap().y;
        assert_eq!(vy_before, vy_after);
    }

    #[test]
    fn test_win_does_not_retrigger_when_completed() {
        let mut sim = new_sim(vec![simple_scene(), simple_scene()]);
        let mut input = InputState::new();

        // Mark the win condition completed by hand; standing on it must not
        // advance the scene again
        let win_entity = sim.registry.win_conditions.entities().next().unwrap();
        sim.registry
            .win_conditions
            .get_mut(win_entity)
            .unwrap()
            .completed = true;
        if let Some(t) = sim.registry.transforms.get_mut(win_entity) {
            t.set_position(Vec3::new(0.0, 0.5, 0.0));
        }

        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();
        assert_eq!(sim.scene_index(), 0);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut sim = new_sim(vec![simple_scene()]);
        let mut input = InputState::new();

        sim.stop();
        input.press(Button::MoveRight);
        sim.frame(0.016, &mut input, &mut NullRenderer, &mut NullPresentation)
            .unwrap();

        let pos = sim.registry().transforms.get(sim.player()).unwrap().position();
        assert_eq!(pos, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(sim.run_state(), RunState::Stopped);
    }
}
