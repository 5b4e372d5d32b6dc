use drive_common::Real;

/// Per-tick angular velocity retention
pub const ANGULAR_DAMPING: Real = 0.85;

/// Velocity multiplier applied on obstacle contact (reverse and damp, all axes)
pub const COLLISION_VELOCITY_SCALE: Real = -0.3;

/// Reverse thrust relative to forward thrust
pub const REVERSE_RATIO: Real = 0.7;

/// Largest frame time fed to the integrator, in seconds
pub const MAX_FRAME_DT: Real = 0.1;

/// Wheel rotation per unit of speed per second (render collaborator)
pub const WHEEL_SPIN_RATE: Real = 0.1;

/// Maximum number of contact records kept by the contact log
pub const MAX_CONTACT_EVENTS: usize = 100;

/// Collision radius of a tree in the reference world
pub const TREE_RADIUS: Real = 3.0;

/// Largest tree count a scattered world accepts
pub const MAX_SCATTER_COUNT: usize = 4096;

/// Half extent of the square reference world
pub const WORLD_HALF_EXTENT: Real = 95.0;

/// Boundary bounce-back factor of the reference world
pub const WORLD_RESTITUTION: Real = 0.3;
