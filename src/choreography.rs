//! Per-mode target poses.
//!
//! For each particle the [`Choreographer`] either produces a target pose for
//! the integrator to blend toward, or, while scattered, moves the particle
//! itself and reports [`ParticleUpdate::DirectPhysicsStep`].

use crate::{
    constants::{
        DEFAULT_FOCUS_POSITION, DEFAULT_FOCUS_SCALE, DEFAULT_RING_DEPTH, DEFAULT_RING_FREQUENCY, DEFAULT_RING_RADIUS,
        DEFAULT_SCATTER_BOUND, DEFAULT_TREE_ANGULAR_DENSITY, DEFAULT_TREE_HEIGHT, DEFAULT_TREE_MAX_RADIUS,
        DEFAULT_TUMBLE_GAIN,
    },
    mode::Mode,
    particle::{Particle, ParticleId},
    pose::{Euler, Pose, Vec3},
};
use std::f64::consts::PI;

/// How a particle is updated this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleUpdate {
    /// Blend the actual pose toward this target
    Blend(Pose),
    /// Pose was already advanced by the drift step; skip blending
    DirectPhysicsStep,
}

/// Geometry of the three layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Helix radius at the base of the tree
    pub tree_max_radius: f64,
    pub tree_height: f64,
    /// Half-turns of the helix from base to tip
    pub tree_angular_density: f64,
    /// Radius of the sphere scattered particles bounce inside
    pub scatter_bound: f64,
    /// Rotation gained per unit of velocity per frame while scattered
    pub tumble_gain: f64,
    pub focus_position: Vec3,
    pub focus_scale: f64,
    pub ring_radius: f64,
    pub ring_frequency: f64,
    /// Z of the background ring
    pub ring_depth: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tree_max_radius: DEFAULT_TREE_MAX_RADIUS,
            tree_height: DEFAULT_TREE_HEIGHT,
            tree_angular_density: DEFAULT_TREE_ANGULAR_DENSITY,
            scatter_bound: DEFAULT_SCATTER_BOUND,
            tumble_gain: DEFAULT_TUMBLE_GAIN,
            focus_position: Vec3::from(DEFAULT_FOCUS_POSITION),
            focus_scale: DEFAULT_FOCUS_SCALE,
            ring_radius: DEFAULT_RING_RADIUS,
            ring_frequency: DEFAULT_RING_FREQUENCY,
            ring_depth: DEFAULT_RING_DEPTH,
        }
    }
}

/// Normalized progress of a particle through the registry, `index / count`
#[must_use]
pub fn progress(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 / count as f64
}

/// Computes each particle's update under the active mode
#[derive(Debug, Clone, Default)]
pub struct Choreographer {
    layout: Layout,
}

impl Choreographer {
    #[must_use]
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Update for `particle` at progress `t` under `mode`.
    ///
    /// In [`Mode::Scatter`] this mutates the particle's position, rotation and
    /// velocity directly.
    pub fn evaluate(
        &self,
        mode: Mode,
        particle: &mut Particle,
        t: f64,
        focus_target: Option<ParticleId>,
    ) -> ParticleUpdate {
        match mode {
            Mode::Tree => ParticleUpdate::Blend(self.tree_pose(t)),
            Mode::Scatter => {
                self.scatter_step(particle);
                ParticleUpdate::DirectPhysicsStep
            }
            Mode::Focus if focus_target == Some(particle.id()) => ParticleUpdate::Blend(self.focus_pose()),
            Mode::Focus => ParticleUpdate::Blend(self.ring_pose(t)),
        }
    }

    /// Point on the descending helix; `t = 0` is the wide base
    #[must_use]
    pub fn tree_pose(&self, t: f64) -> Pose {
        let Layout {
            tree_max_radius,
            tree_height,
            tree_angular_density,
            ..
        } = self.layout;
        let radius = tree_max_radius * (1.0 - t);
        let angle = t * tree_angular_density * PI;

        Pose {
            position: Vec3::new(
                angle.cos() * radius,
                t * tree_height - tree_height / 2.0,
                angle.sin() * radius,
            ),
            rotation: Euler::new(0.0, angle, 0.0),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Close-up pose of the focus target
    #[must_use]
    pub fn focus_pose(&self) -> Pose {
        Pose {
            position: self.layout.focus_position,
            rotation: Euler::identity(),
            scale: Vec3::repeat(self.layout.focus_scale),
        }
    }

    /// Background ring pose for every particle that is not the focus target
    #[must_use]
    pub fn ring_pose(&self, t: f64) -> Pose {
        let angle = t * self.layout.ring_frequency;
        Pose::at(Vec3::new(
            angle.cos() * self.layout.ring_radius,
            angle.sin() * self.layout.ring_radius,
            self.layout.ring_depth,
        ))
    }

    /// One frame of drift: move by velocity, bounce off the bounding sphere,
    /// tumble in proportion to velocity. Scale is left alone.
    ///
    /// The bounce negates the whole velocity, and only while the particle is
    /// outside the sphere and still heading outward, so a particle that starts
    /// far outside drifts back in instead of flipping every frame.
    pub fn scatter_step(&self, particle: &mut Particle) {
        particle.pose.position += particle.velocity;

        let position = particle.pose.position;
        // Negating on distance alone would flip again next frame while still outside
        if position.norm() > self.layout.scatter_bound && position.dot(&particle.velocity) > 0.0 {
            particle.velocity = -particle.velocity;
        }

        particle.pose.rotation.x += particle.velocity.x * self.layout.tumble_gain;
        particle.pose.rotation.y += particle.velocity.y * self.layout.tumble_gain;
    }
}
