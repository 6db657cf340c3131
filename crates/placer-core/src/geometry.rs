//! Pure geometry helpers used by placement, overlays and distance labels.
//!
//! Nothing in here holds state. Angles are radians unless a function name or
//! doc says otherwise.

use glam::{Quat, Vec3};

/// Roll/pitch/yaw decomposition of a rotation, in radians.
///
/// `roll` rotates about X, `pitch` about Y and `yaw` about Z, matching the
/// per-axis rotation vector scene nodes consume (see [`EulerAngles::to_vec3`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl EulerAngles {
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.roll, self.pitch, self.yaw)
    }
}

/// Euclidean distance between two world positions.
#[inline]
pub fn distance_3d(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
}

/// Converts a quaternion (x, y, z, w) to roll/pitch/yaw.
///
/// The pitch term is clamped to [-1, 1] before `asin` so values nudged just
/// past the boundary by float error resolve to exactly ±π/2 instead of NaN.
pub fn quaternion_to_euler(q: Quat) -> EulerAngles {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    let ysqr = y * y;

    let t0 = 2.0 * (w * x + y * z);
    let t1 = 1.0 - 2.0 * (x * x + ysqr);
    let roll = t0.atan2(t1);

    let t2 = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0);
    let pitch = t2.asin();

    let t3 = 2.0 * (w * z + x * y);
    let t4 = 1.0 - 2.0 * (ysqr + z * z);
    let yaw = t3.atan2(t4);

    EulerAngles { roll, pitch, yaw }
}

/// Heading, in degrees, that turns a subject at `subject` to face `observer`
/// on the horizontal plane. Only the X/Z components take part.
#[inline]
pub fn yaw_to_face(observer: Vec3, subject: Vec3) -> f32 {
    (observer.x - subject.x)
        .atan2(observer.z - subject.z)
        .to_degrees()
}

/// Rotation vector (radians per axis) for a node that only yaws about +Y.
#[inline]
pub fn facing_rotation(yaw_degrees: f32) -> Vec3 {
    Vec3::new(0.0, yaw_degrees.to_radians(), 0.0)
}
