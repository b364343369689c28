//! End-to-end gameplay scenarios over a kinematic physics stub.
//!
//! The stub integrates dynamic bodies at the fixed timestep with no gravity
//! and no collision response, which makes player motion exactly predictable:
//! one frame of held movement at 1/60 s advances the player 0.1 m.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lockstep_ecs::{Interactable, MeshHandle, Registry};
use lockstep_math::{Mat4, Vec3};
use lockstep_physics::{BodyDesc, BodyHandle, PhysicsBridge, PhysicsEngine, PhysicsError};
use lockstep_scene::{self as scene, BuildSettings, DoorDesc, KeyDesc, MeshSet, SceneDescriptor};
use lockstep_sim::{
    Button, InputState, Presentation, Renderer, RunState, SimConfig, Simulation,
};
use lockstep_state::{KeyColor, PersistentState};

const DT: f32 = 1.0 / 60.0;

struct StubBody {
    position: Vec3,
    velocity: Vec3,
    dynamic: bool,
}

/// Gravityless kinematic engine: `step` advances every dynamic body by
/// `velocity / 60`, nothing else moves and nothing collides.
#[derive(Default)]
struct KinematicStub {
    bodies: HashMap<u64, StubBody>,
    next: u64,
    steps: Arc<AtomicUsize>,
}

impl KinematicStub {
    fn counting(steps: Arc<AtomicUsize>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }
}

impl PhysicsEngine for KinematicStub {
    fn create_body(&mut self, desc: &BodyDesc) -> lockstep_physics::Result<BodyHandle> {
        let handle = BodyHandle(self.next);
        self.next += 1;
        self.bodies.insert(
            handle.0,
            StubBody {
                position: desc.position,
                velocity: Vec3::ZERO,
                dynamic: desc.dynamic,
            },
        );
        Ok(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle.0);
    }

    fn step(&mut self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
        for body in self.bodies.values_mut() {
            if body.dynamic {
                body.position += body.velocity * DT;
            }
        }
    }

    fn position(&self, handle: BodyHandle) -> lockstep_physics::Result<Vec3> {
        self.bodies
            .get(&handle.0)
            .map(|b| b.position)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn linear_velocity(&self, handle: BodyHandle) -> lockstep_physics::Result<Vec3> {
        self.bodies
            .get(&handle.0)
            .map(|b| b.velocity)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn set_linear_velocity(
        &mut self,
        handle: BodyHandle,
        velocity: Vec3,
    ) -> lockstep_physics::Result<()> {
        self.bodies
            .get_mut(&handle.0)
            .map(|b| b.velocity = velocity)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }
}

#[derive(Default)]
struct Recorder {
    shown: Vec<(String, f32)>,
}

impl Presentation for Recorder {
    fn show_message(&mut self, text: &str, duration: f32) {
        self.shown.push((text.to_owned(), duration));
    }
}

impl Recorder {
    fn saw(&self, needle: &str) -> bool {
        self.shown.iter().any(|(text, _)| text.contains(needle))
    }
}

#[derive(Default)]
struct FrameRenderer {
    submitted: Vec<(MeshHandle, Mat4)>,
}

impl Renderer for FrameRenderer {
    fn submit(&mut self, mesh: MeshHandle, world: Mat4) {
        self.submitted.push((mesh, world));
    }
}

struct Harness {
    sim: Simulation,
    input: InputState,
    recorder: Recorder,
    engines_created: Arc<AtomicUsize>,
    steps: Arc<AtomicUsize>,
}

impl Harness {
    fn new(scenes: Vec<SceneDescriptor>) -> Self {
        let engines_created = Arc::new(AtomicUsize::new(0));
        let steps = Arc::new(AtomicUsize::new(0));
        let created = Arc::clone(&engines_created);
        let step_counter = Arc::clone(&steps);
        let sim = Simulation::new(
            scenes,
            SimConfig::default(),
            BuildSettings::default(),
            MeshSet::sequential(),
            Box::new(move || {
                created.fetch_add(1, Ordering::Relaxed);
                Box::new(KinematicStub::counting(Arc::clone(&step_counter)))
            }),
        )
        .unwrap();
        Self {
            sim,
            input: InputState::new(),
            recorder: Recorder::default(),
            engines_created,
            steps,
        }
    }

    fn frames(&mut self, count: usize) {
        let mut renderer = FrameRenderer::default();
        for _ in 0..count {
            self.sim
                .frame(DT, &mut self.input, &mut renderer, &mut self.recorder)
                .unwrap();
        }
    }

    /// One frame with the interact button edge set
    fn interact(&mut self) {
        self.input.press(Button::Interact);
        self.frames(1);
        self.input.release(Button::Interact);
    }

    fn player_x(&self) -> f32 {
        self.sim
            .registry()
            .transforms
            .get(self.sim.player())
            .unwrap()
            .position()
            .x
    }
}

fn walkway(collectibles: &[f32], win_x: f32) -> SceneDescriptor {
    let mut scene = SceneDescriptor::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(win_x, 0.5, 0.0));
    for &x in collectibles {
        scene.collectibles.push(Vec3::new(x, 0.5, 0.0));
    }
    scene
}

fn key_door_scene() -> SceneDescriptor {
    let mut scene = walkway(&[], 12.0);
    scene.keys.push(KeyDesc {
        id: "key_red".into(),
        color: KeyColor::Red,
        position: Vec3::new(3.0, 0.5, 0.0),
    });
    scene.doors.push(DoorDesc {
        id: "door_red".into(),
        color: KeyColor::Red,
        position: Vec3::new(8.0, 0.5, 0.0),
        size: Vec3::new(2.0, 2.0, 0.4),
    });
    scene
}

#[test]
fn collect_everything_and_advance() {
    // Three pickups on the way to the exit; holding right walks through all
    // of them and onto the win trigger, advancing to the second scene
    let mut h = Harness::new(vec![
        walkway(&[3.0, 5.0, 7.0], 10.0),
        walkway(&[], 20.0),
    ]);

    h.input.press(Button::MoveRight);
    h.frames(95);

    assert_eq!(h.sim.scene_index(), 1);
    assert_eq!(h.sim.run_state(), RunState::Running);
    assert_eq!(h.engines_created.load(Ordering::Relaxed), 2);
    // The new scene starts the player back at its own spawn
    assert!(h.player_x() < 2.0);
}

#[test]
fn win_requires_all_collectibles() {
    // The exit sits before a far-away pickup; walking over it must not
    // advance while the pickup is outstanding
    let mut h = Harness::new(vec![walkway(&[30.0], 3.0), walkway(&[], 20.0)]);

    h.input.press(Button::MoveRight);
    h.frames(60);

    assert!(h.player_x() > 5.0, "player should have passed the exit");
    assert_eq!(h.sim.scene_index(), 0);
}

#[test]
fn key_then_door() {
    let mut h = Harness::new(vec![key_door_scene(), walkway(&[], 20.0)]);

    // Walk into key range and take it
    h.input.press(Button::MoveRight);
    h.frames(20);
    h.input.release(Button::MoveRight);
    h.interact();

    assert!(h.sim.state().inventory.holds(KeyColor::Red));
    assert!(h.sim.state().key_collected("key_red"));
    assert!(h.recorder.saw("red key"));
    let keys_left = h
        .sim
        .registry()
        .interactables
        .iter()
        .filter(|(_, i)| matches!(i, Interactable::Key { .. }))
        .count();
    assert_eq!(keys_left, 0);

    // Continue to the door and open it
    h.input.press(Button::MoveRight);
    h.frames(45);
    h.input.release(Button::MoveRight);
    h.interact();

    assert!(h.sim.state().door_open("door_red"));
    assert!(h.recorder.saw("door opens"));
    // The door's body and components are gone in the same operation
    assert!(h.sim.registry().interactables.is_empty());

    // Opening does not consume the key
    assert!(h.sim.state().inventory.holds(KeyColor::Red));
}

#[test]
fn door_denies_without_key() {
    let mut h = Harness::new(vec![key_door_scene()]);

    // Straight to the door, skipping the key press
    h.input.press(Button::MoveRight);
    h.frames(65);
    h.input.release(Button::MoveRight);
    h.interact();

    assert!(!h.sim.state().door_open("door_red"));
    assert!(h.recorder.saw("need the red key"));
    // The door entity survives the denied attempt
    let doors = h
        .sim
        .registry()
        .interactables
        .iter()
        .filter(|(_, i)| matches!(i, Interactable::Door { .. }))
        .count();
    assert_eq!(doors, 1);
}

#[test]
fn interact_prompt_appears_in_range() {
    let mut h = Harness::new(vec![key_door_scene()]);

    h.frames(1);
    assert!(!h.recorder.saw("interact"), "nothing in range yet");

    h.input.press(Button::MoveRight);
    h.frames(20);

    assert!(h.recorder.saw("Press E to interact"));
}

#[test]
fn consumed_objects_survive_a_rebuild() {
    // Collect the key and open the door, then project the same descriptor
    // through the persistent state into a fresh world: neither comes back
    let descriptor = key_door_scene();
    let mut h = Harness::new(vec![descriptor.clone()]);

    h.input.press(Button::MoveRight);
    h.frames(20);
    h.input.release(Button::MoveRight);
    h.interact();
    h.input.press(Button::MoveRight);
    h.frames(45);
    h.input.release(Button::MoveRight);
    h.interact();

    let mut state: PersistentState = h.sim.state().clone();
    let mut registry = Registry::new();
    let mut bridge = PhysicsBridge::new();
    let mut engine = KinematicStub::default();
    scene::build(
        &descriptor,
        &BuildSettings::default(),
        &MeshSet::sequential(),
        &mut state,
        &mut engine,
        &mut bridge,
        &mut registry,
    )
    .unwrap();

    assert!(registry.interactables.is_empty());
    // Player and floor only; no door body was created
    assert_eq!(engine.bodies.len(), 2);
}

#[test]
fn final_scene_victory() {
    let mut h = Harness::new(vec![walkway(&[], 4.0)]);

    h.input.press(Button::MoveRight);
    h.frames(40);

    assert_eq!(h.sim.run_state(), RunState::Victory);
    assert!(h.recorder.saw("You win!"));

    // Terminal: further frames change nothing
    let x = h.player_x();
    h.frames(10);
    assert_eq!(h.player_x(), x);
}

#[test]
fn physics_steps_track_frames_exactly() {
    // dt equal to the fixed timestep yields exactly one step per frame
    let mut h = Harness::new(vec![walkway(&[], 20.0)]);

    h.frames(120);
    assert_eq!(h.steps.load(Ordering::Relaxed), 120);
}

#[test]
fn consumed_pickups_leave_the_draw_list() {
    let mut h = Harness::new(vec![walkway(&[2.0], 20.0)]);
    let mut renderer = FrameRenderer::default();

    h.sim
        .frame(DT, &mut h.input, &mut renderer, &mut h.recorder)
        .unwrap();
    // Player, floor, win marker, collectible
    assert_eq!(renderer.submitted.len(), 4);

    // Walk onto the pickup
    h.input.press(Button::MoveRight);
    h.frames(20);
    h.input.release(Button::MoveRight);

    let mut renderer = FrameRenderer::default();
    h.sim
        .frame(DT, &mut h.input, &mut renderer, &mut h.recorder)
        .unwrap();
    assert_eq!(renderer.submitted.len(), 3);
}
