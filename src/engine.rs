//! The choreography engine: one object owning the registry, the mode machine
//! and the per-frame pipeline.
//!
//! Two entry points run at independent rates:
//! - [`ChoreographyEngine::process_hand_frame`] once per processed video frame
//! - [`ChoreographyEngine::render_frame`] once per display refresh
//!
//! Both receive the caller-owned [`HandTrackingState`]; the hand frame writes
//! it, the render frame only reads it.

use crate::{
    choreography::{progress, Choreographer},
    config::Config,
    constants::{DEFAULT_HAND_ROTATION_GAIN, DEFAULT_HAND_ROTATION_SMOOTHING, DEFAULT_IDLE_SPIN},
    gesture::{GestureClassifier, HandSample, HandTrackingState, ModeVote},
    integrator::PoseIntegrator,
    mode::{Mode, ModeObserver, ModeStateMachine},
    particle::{Particle, ParticleId, ParticleKind, ParticleRegistry, TextureHandle},
    pose::Euler,
};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Texture handle of the placeholder photo registered at startup
pub const DEFAULT_PHOTO_TEXTURE: TextureHandle = TextureHandle(0);

/// Steers the whole-scene rotation from the hand position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationControl {
    gain: f64,
    smoothing: f64,
    idle_spin: f64,
}

impl RotationControl {
    #[must_use]
    pub const fn new(gain: f64, smoothing: f64, idle_spin: f64) -> Self {
        Self {
            gain,
            smoothing,
            idle_spin,
        }
    }

    /// One frame: ease toward the hand while tracking, otherwise spin slowly
    pub fn update(&self, rotation: &mut Euler, tracking: &HandTrackingState) {
        match tracking.hand_position() {
            Some((x, y)) => {
                rotation.y += (x * self.gain - rotation.y) * self.smoothing;
                rotation.x += (y * self.gain - rotation.x) * self.smoothing;
            }
            None => rotation.y += self.idle_spin,
        }
    }
}

impl Default for RotationControl {
    fn default() -> Self {
        Self::new(DEFAULT_HAND_ROTATION_GAIN, DEFAULT_HAND_ROTATION_SMOOTHING, DEFAULT_IDLE_SPIN)
    }
}

/// Result of feeding one hand frame to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandFrameOutcome {
    pub vote: ModeVote,
    /// New mode, when the vote caused a transition
    pub transition: Option<Mode>,
}

/// Pose of one particle as handed to a renderer or written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl From<&Particle> for PoseRecord {
    fn from(particle: &Particle) -> Self {
        let pose = &particle.pose;
        Self {
            id: particle.id(),
            kind: particle.kind(),
            position: pose.position.into(),
            rotation: [pose.rotation.x, pose.rotation.y, pose.rotation.z],
            scale: pose.scale.into(),
        }
    }
}

/// Full scene state at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub mode: Mode,
    pub focus_target: Option<ParticleId>,
    pub group_rotation: [f64; 3],
    pub particles: Vec<PoseRecord>,
}

/// Gesture-driven particle choreography
#[derive(Debug)]
pub struct ChoreographyEngine {
    registry: ParticleRegistry,
    machine: ModeStateMachine,
    classifier: GestureClassifier,
    choreographer: Choreographer,
    integrator: PoseIntegrator,
    rotation_control: RotationControl,
    group_rotation: Euler,
    frame: u64,
}

impl ChoreographyEngine {
    /// Assemble an engine from its parts; the registry is used as is
    #[must_use]
    pub fn new(
        registry: ParticleRegistry,
        machine: ModeStateMachine,
        classifier: GestureClassifier,
        choreographer: Choreographer,
        integrator: PoseIntegrator,
        rotation_control: RotationControl,
    ) -> Self {
        Self {
            registry,
            machine,
            classifier,
            choreographer,
            integrator,
            rotation_control,
            group_rotation: Euler::identity(),
            frame: 0,
        }
    }

    /// Build and populate an engine from configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let (registry_rng, machine_rng) = match config.scene.seed {
            Some(seed) => (StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed.wrapping_add(1))),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let mut registry = ParticleRegistry::new(registry_rng, config.spawn_settings());
        registry.populate_decorations(config.scene.decor_count);
        if config.scene.default_photo {
            registry.add_photo(DEFAULT_PHOTO_TEXTURE);
        }
        info!(
            "Choreography engine ready with {} particles ({} decorations)",
            registry.len(),
            config.scene.decor_count
        );

        Self::new(
            registry,
            ModeStateMachine::new(machine_rng),
            config.create_classifier(),
            config.create_choreographer(),
            config.create_integrator(),
            config.rotation_control(),
        )
    }

    /// Classify one hand frame (`None` when no hand was detected) and apply the vote
    pub fn process_hand_frame(
        &mut self,
        sample: Option<&HandSample>,
        tracking: &mut HandTrackingState,
    ) -> HandFrameOutcome {
        let vote = self.classifier.classify(sample, tracking);
        let transition = self.machine.apply_vote(vote, &self.registry);
        HandFrameOutcome { vote, transition }
    }

    /// Advance every particle by one display frame
    pub fn render_frame(&mut self, tracking: &HandTrackingState) {
        self.rotation_control.update(&mut self.group_rotation, tracking);

        let mode = self.machine.mode();
        let focus_target = self.machine.focus_target();
        let count = self.registry.len();

        for (index, particle) in self.registry.iter_mut().enumerate() {
            let update = self
                .choreographer
                .evaluate(mode, particle, progress(index, count), focus_target);
            self.integrator.apply(particle, &update);
        }

        self.frame += 1;
    }

    /// Register an uploaded photo; it joins the layout on the next frame
    pub fn add_photo(&mut self, texture: TextureHandle) -> ParticleId {
        self.registry.add_photo(texture)
    }

    /// Force a mode, with the same edge-triggered side effects as a vote
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        self.machine.set_mode(mode, &self.registry)
    }

    /// Be told about every mode change
    pub fn subscribe(&mut self, observer: impl ModeObserver + 'static) {
        self.machine.subscribe(observer);
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.machine.mode()
    }

    #[must_use]
    pub const fn focus_target(&self) -> Option<ParticleId> {
        self.machine.focus_target()
    }

    #[must_use]
    pub const fn registry(&self) -> &ParticleRegistry {
        &self.registry
    }

    /// Rotation of the group holding every particle
    #[must_use]
    pub const fn group_rotation(&self) -> Euler {
        self.group_rotation
    }

    /// Render frames processed so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Copy of the current scene state
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        let r = self.group_rotation;
        SceneSnapshot {
            frame: self.frame,
            mode: self.mode(),
            focus_target: self.focus_target(),
            group_rotation: [r.x, r.y, r.z],
            particles: self.registry.iter().map(PoseRecord::from).collect(),
        }
    }
}
