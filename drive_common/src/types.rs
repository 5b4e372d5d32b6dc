use rapier3d::na::{UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use rapier3d::math::Real;

/// World-space 3D vector (y is up)
pub type Vec3 = Vector3<Real>;
/// Ground-plane vector, stored as (x, z)
pub type Vec2 = Vector2<Real>;

/// Vehicle-local forward axis
pub fn local_forward() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// Rotation about +Y for a heading angle in radians
#[inline]
pub fn heading_rotation(heading: Real) -> UnitQuaternion<Real> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), heading)
}

/// Rotate a vehicle-local vector into the world frame of the given heading
#[inline]
pub fn rotate_by_heading(heading: Real, local: Vec3) -> Vec3 {
    heading_rotation(heading) * local
}

/// Current forward axis for a heading; always derived, never cached
#[inline]
pub fn forward_axis(heading: Real) -> Vec3 {
    rotate_by_heading(heading, local_forward())
}

/// Project a world position onto the ground plane
#[inline]
pub fn ground_xz(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Newtype wrapper for obstacle indices in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl From<usize> for ObstacleId {
    fn from(index: usize) -> Self {
        ObstacleId(index as u32)
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obstacle#{}", self.0)
    }
}

/// Per-frame view of the simulation handed to the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub position: [Real; 3],
    pub heading: Real,
    pub speed: Real,
    pub camera_position: [Real; 3],
    pub camera_target: [Real; 3],
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_heading_faces_negative_z() {
        let f = forward_axis(0.0);
        assert_abs_diff_eq!(f.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn quarter_turn_left_faces_negative_x() {
        let f = forward_axis(FRAC_PI_2);
        assert_abs_diff_eq!(f.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_keeps_vertical_component() {
        let v = rotate_by_heading(1.3, Vec3::new(0.0, 10.0, 18.0));
        assert_abs_diff_eq!(v.y, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ground_xz(&v).norm(), 18.0, epsilon = 1e-4);
    }

    #[test]
    fn obstacle_id_display() {
        assert_eq!(ObstacleId::from(3usize).to_string(), "obstacle#3");
    }

    #[test]
    fn snapshot_json_keeps_field_names() {
        let snap = Snapshot {
            tick: 12,
            position: [1.0, 0.5, -3.0],
            heading: 0.25,
            speed: 7.5,
            camera_position: [1.0, 10.5, 15.0],
            camera_target: [1.0, 2.5, -3.0],
            paused: true,
        };
        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["tick"], 12);
        assert_eq!(json["paused"], true);
        assert_eq!(json["position"][2], -3.0);
        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);

        assert_eq!(serde_json::to_string(&ObstacleId(4)).unwrap(), "4");
    }
}
