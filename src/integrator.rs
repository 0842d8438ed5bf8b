//! Pose integrator: fixed-rate exponential smoothing toward target poses.

use crate::{
    choreography::ParticleUpdate,
    constants::DEFAULT_TRANSITION_SPEED,
    particle::Particle,
    pose::{Blend, Pose},
};

/// Blends actual poses toward targets with one factor for every particle and mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseIntegrator {
    factor: f64,
}

impl PoseIntegrator {
    /// # Panics
    ///
    /// Panics if `factor` is outside `(0, 1]`.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        assert!(factor > 0.0 && factor <= 1.0, "Blend factor must be in (0, 1]");
        Self { factor }
    }

    /// Fraction of the remaining gap closed per step
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Move `pose` one step toward `target`: lerp for position and scale, slerp for rotation
    pub fn integrate(&self, pose: &mut Pose, target: &Pose) {
        *pose = pose.blend(target, self.factor);
    }

    /// Apply a choreography update; direct physics steps were already applied
    pub fn apply(&self, particle: &mut Particle, update: &ParticleUpdate) {
        match update {
            ParticleUpdate::Blend(target) => self.integrate(&mut particle.pose, target),
            ParticleUpdate::DirectPhysicsStep => {}
        }
    }

    /// Number of steps needed to close all but `remaining` of a gap.
    ///
    /// Returns `None` when `remaining` is not positive or is NaN, since a
    /// geometric blend never closes the gap completely.
    #[must_use]
    pub fn steps_to_settle(&self, remaining: f64) -> Option<u32> {
        if remaining.is_nan() || remaining <= 0.0 {
            return None;
        }
        if self.factor >= 1.0 || remaining >= 1.0 {
            return Some(1);
        }
        Some((remaining.ln() / (1.0 - self.factor).ln()).ceil() as u32)
    }
}

impl Default for PoseIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{angle_between, Euler, Vec3};

    #[test]
    fn test_convergence_matches_closed_form() {
        let integrator = PoseIntegrator::new(0.1);
        let mut pose = Pose::default();
        let target = Pose::at(Vec3::new(10.0, 0.0, 0.0));

        for k in 1..=60 {
            integrator.integrate(&mut pose, &target);
            let expected = 10.0 * (1.0 - 0.9_f64.powi(k));
            assert!((pose.position.x - expected).abs() < 1e-9, "step {k}");
        }
    }

    #[test]
    fn test_rotation_and_scale_blend_together() {
        let integrator = PoseIntegrator::new(0.25);
        let mut pose = Pose::default();
        let target = Pose {
            position: Vec3::zeros(),
            rotation: Euler::new(0.0, 0.8, 0.0),
            scale: Vec3::repeat(4.5),
        };

        integrator.integrate(&mut pose, &target);
        assert!((pose.scale.x - 1.875).abs() < 1e-12);
        assert!((angle_between(&pose.rotation, &target.rotation) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_direct_step_is_left_alone() {
        use crate::particle::{ParticleKind, ParticleRegistry};

        let integrator = PoseIntegrator::default();
        let mut registry = ParticleRegistry::with_seed(0);
        registry.add_particle(ParticleKind::DecorBox, Vec3::new(3.0, 4.0, 5.0), Vec3::zeros());
        let particle = registry.iter_mut().next().unwrap();
        let before = particle.pose;

        integrator.apply(particle, &ParticleUpdate::DirectPhysicsStep);
        assert_eq!(particle.pose, before);
    }

    #[test]
    fn test_default_transition_takes_seconds_at_60_fps() {
        let steps = PoseIntegrator::default().steps_to_settle(0.01).unwrap();
        assert!((60..=600).contains(&steps), "steps: {steps}");
    }

    #[test]
    fn test_settle_needs_positive_remainder() {
        let integrator = PoseIntegrator::new(0.5);
        assert_eq!(integrator.steps_to_settle(0.0), None);
        assert_eq!(integrator.steps_to_settle(-0.1), None);
        assert_eq!(integrator.steps_to_settle(f64::NAN), None);
        assert_eq!(integrator.steps_to_settle(0.3), Some(2));
        assert_eq!(integrator.steps_to_settle(2.0), Some(1));
        assert_eq!(PoseIntegrator::new(1.0).steps_to_settle(1e-6), Some(1));
    }

    #[test]
    #[should_panic(expected = "Blend factor must be in (0, 1]")]
    fn test_zero_factor_rejected() {
        let _ = PoseIntegrator::new(0.0);
    }
}
