//! Position/rotation pairs and hierarchical transform composition.
//!
//! Scene documents author placements as a position plus three Euler angles;
//! every nested element inherits its parent's transform. [`Transform`] is the
//! composed world-space result and [`Transform::compose`] is the single place
//! where parent-to-child composition happens.

use cgmath::{Deg, One, Quaternion, Rotation3, Vector3, Zero};

/// A world-space placement: position plus unit rotation quaternion.
///
/// Callers must keep the rotation normalized; all quaternions produced by
/// this module (identity, Euler conversion, composition of unit quaternions)
/// already are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Transform {
    /// The identity placement: origin, no rotation.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
        }
    }

    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Compose a child's local placement with `self` as the parent.
    ///
    /// Returns `(self.rotation * local_position + self.position,
    /// self.rotation * local_rotation)`. Pure and total for finite inputs.
    pub fn compose(&self, local_position: Vector3<f32>, local_rotation: Quaternion<f32>) -> Self {
        Self {
            position: self.rotation * local_position + self.position,
            rotation: self.rotation * local_rotation,
        }
    }

    /// Apply this transform to a point.
    pub fn transform_point(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.rotation * point + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Convert the scene document's Euler angles (degrees, X/Y/Z) to a quaternion.
///
/// Scene content is authored against yaw-then-roll-then-pitch composition:
/// `quat(eulerYZ(y, z) * eulerX(x))`. Do not swap this for a canonical XYZ
/// Euler routine; the order is part of the file format.
pub fn rotation_from_euler_deg(x: f32, y: f32, z: f32) -> Quaternion<f32> {
    Quaternion::from_angle_y(Deg(y))
        * Quaternion::from_angle_z(Deg(z))
        * Quaternion::from_angle_x(Deg(x))
}
