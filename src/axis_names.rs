/// Names for the two observable orientation axes, in trajectory order (0=Roll, 1=Pitch).
/// Yaw is not observable without a magnetometer.
pub const ORIENTATION_AXIS_COUNT: usize = 2;

pub const AXIS_NAMES: [&str; ORIENTATION_AXIS_COUNT] = ["Roll", "Pitch"];
