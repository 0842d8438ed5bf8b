//! Vector and pose math.
//!
//! Positions and scales are `nalgebra` vectors blended linearly; rotations are
//! stored as XYZ-order Euler angles and blended spherically through their
//! quaternion equivalent. Every blend closes a fraction `factor` of the
//! remaining gap, so repeated application converges geometrically.

use crate::constants::SLERP_EPSILON;
use nalgebra::{UnitQuaternion, Vector3};

/// 3D vector used for positions, scales and velocities
pub type Vec3 = Vector3<f64>;

/// Values that can be moved a fraction of the way toward a target
pub trait Blend: Sized {
    /// Close `factor` of the gap between `self` and `target`.
    ///
    /// `factor` is expected in `(0, 1]`; `factor >= 1` returns the target.
    fn blend(&self, target: &Self, factor: f64) -> Self;
}

/// Free-function form of [`Blend::blend`]
pub fn blend<T: Blend>(current: &T, target: &T, factor: f64) -> T {
    current.blend(target, factor)
}

impl Blend for Vec3 {
    fn blend(&self, target: &Self, factor: f64) -> Self {
        if factor >= 1.0 {
            return *target;
        }
        self + (target - self) * factor
    }
}

impl Blend for UnitQuaternion<f64> {
    fn blend(&self, target: &Self, factor: f64) -> Self {
        if factor >= 1.0 {
            return *target;
        }
        slerp(self, target, factor)
    }
}

/// Spherical interpolation that never panics.
///
/// `nalgebra`'s `slerp` rejects (nearly) parallel and antipodal inputs, which is
/// exactly where a converging blend spends most of its time, so those cases
/// fall back to a normalized lerp on the same hemisphere.
pub fn slerp(current: &UnitQuaternion<f64>, target: &UnitQuaternion<f64>, factor: f64) -> UnitQuaternion<f64> {
    current.try_slerp(target, factor, SLERP_EPSILON).unwrap_or_else(|| {
        let target = if current.coords.dot(&target.coords) < 0.0 {
            UnitQuaternion::new_unchecked(-target.into_inner())
        } else {
            *target
        };
        current.nlerp(&target, factor)
    })
}

/// Rotation as Euler angles (radians), applied in X, then Y, then Z order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    /// Create from individual angles
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero rotation
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Equivalent unit quaternion
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.y)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.z)
    }

    /// Decompose a quaternion back into XYZ Euler angles
    #[must_use]
    pub fn from_quaternion(q: &UnitQuaternion<f64>) -> Self {
        let m = q.to_rotation_matrix();
        let m = m.matrix();
        let m13 = m[(0, 2)].clamp(-1.0, 1.0);
        let y = m13.asin();

        if m13.abs() < 0.999_999_9 {
            Self::new((-m[(1, 2)]).atan2(m[(2, 2)]), y, (-m[(0, 1)]).atan2(m[(0, 0)]))
        } else {
            // Gimbal lock: fold all roll into X
            Self::new(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
        }
    }
}

impl Blend for Euler {
    fn blend(&self, target: &Self, factor: f64) -> Self {
        if factor >= 1.0 {
            return *target;
        }
        if self == target {
            return *self;
        }
        Self::from_quaternion(&self.to_quaternion().blend(&target.to_quaternion(), factor))
    }
}

/// Position, rotation and scale of one posable object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: Vec3,
}

impl Pose {
    /// Pose at `position` with zero rotation and unit scale
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Euler::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Orientation as a quaternion, for renderers that want one
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.rotation.to_quaternion()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::zeros())
    }
}

impl Blend for Pose {
    fn blend(&self, target: &Self, factor: f64) -> Self {
        Self {
            position: self.position.blend(&target.position, factor),
            rotation: self.rotation.blend(&target.rotation, factor),
            scale: self.scale.blend(&target.scale, factor),
        }
    }
}

/// Angle in radians between two orientations
#[must_use]
pub fn angle_between(a: &Euler, b: &Euler) -> f64 {
    a.to_quaternion().angle_to(&b.to_quaternion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_vector_blend_identities() {
        let x = Vec3::new(1.5, -2.0, 3.25);
        let y = Vec3::new(-4.0, 8.0, 0.5);

        assert_eq!(blend(&x, &x, 0.3), x);
        assert_eq!(blend(&x, &y, 1.0), y);
        assert_eq!(blend(&x, &y, 0.5), Vec3::new(-1.25, 3.0, 1.875));
    }

    #[test]
    fn test_euler_quaternion_round_trip() {
        let e = Euler::new(0.3, -0.7, 1.1);
        let back = Euler::from_quaternion(&e.to_quaternion());
        assert!((back.x - e.x).abs() < 1e-9);
        assert!((back.y - e.y).abs() < 1e-9);
        assert!((back.z - e.z).abs() < 1e-9);
    }

    #[test]
    fn test_euler_gimbal_lock_keeps_orientation() {
        let e = Euler::new(0.4, FRAC_PI_2, 0.2);
        let back = Euler::from_quaternion(&e.to_quaternion());
        assert!(angle_between(&e, &back) < 1e-6);
    }

    #[test]
    fn test_slerp_nearly_equal_does_not_panic() {
        let q = Euler::new(0.0, 1e-12, 0.0).to_quaternion();
        let r = Euler::identity().to_quaternion();
        let s = slerp(&q, &r, 0.5);
        assert!(s.angle_to(&r) < 1e-9);
    }

    #[test]
    fn test_slerp_antipodal_representation() {
        let q: UnitQuaternion<f64> = UnitQuaternion::identity();
        let neg = UnitQuaternion::new_unchecked(-q.into_inner());
        let s = slerp(&q, &neg, 0.5);
        assert!(s.angle_to(&q) < 1e-9);
    }

    #[test]
    fn test_rotation_blend_moves_toward_target() {
        let from = Euler::identity();
        let to = Euler::new(0.0, 1.0, 0.0);
        let half = from.blend(&to, 0.5);
        assert!((angle_between(&half, &from) - 0.5).abs() < 1e-9);
        assert!((angle_between(&half, &to) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pose_blend_full_factor_reaches_target() {
        let current = Pose::at(Vec3::new(1.0, 2.0, 3.0));
        let target = Pose {
            position: Vec3::new(0.0, 2.0, 35.0),
            rotation: Euler::new(0.0, 0.5, 0.0),
            scale: Vec3::repeat(4.5),
        };
        assert_eq!(current.blend(&target, 1.0), target);
    }

    proptest! {
        #[test]
        fn prop_blend_converges_without_overshoot(
            start in -100.0f64..100.0,
            target in -100.0f64..100.0,
            factor in 0.001f64..1.0,
        ) {
            let goal = Vec3::new(target, 0.0, 0.0);
            let mut current = Vec3::new(start, 0.0, 0.0);
            let mut gap = (goal.x - current.x).abs();
            for _ in 0..50 {
                current = current.blend(&goal, factor);
                let next_gap = (goal.x - current.x).abs();
                prop_assert!(next_gap <= gap + 1e-9);
                // never crosses the target
                prop_assert!((goal.x - current.x) * (target - start) >= -1e-9);
                gap = next_gap;
            }
        }

        #[test]
        fn prop_blend_to_self_is_identity(
            x in -50.0f64..50.0,
            y in -50.0f64..50.0,
            z in -50.0f64..50.0,
            factor in 0.0f64..1.0,
        ) {
            let v = Vec3::new(x, y, z);
            prop_assert_eq!(v.blend(&v, factor), v);
            let e = Euler::new(x / 50.0, y / 50.0, z / 50.0);
            prop_assert_eq!(e.blend(&e, factor), e);
        }
    }
}
