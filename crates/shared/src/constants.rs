// Arena (screen coordinates: X=right, Y=down)
pub const ARENA_WIDTH: f32 = 1000.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const CELL_PIXEL_SIZE: f32 = 50.0;

// Tank kinematics
pub const TANK_SPEED: f32 = 8.0; // pixels per forward/backward command
pub const ANGLE_STEP: f32 = 45.0; // degrees per turn/aim command

// Direction bucketing
pub const DEGREES_PER_SEGMENT: f32 = 45.0;
pub const HALF_SEGMENT: f32 = DEGREES_PER_SEGMENT / 2.0;
pub const DIRECTION_BUCKETS: usize = 8;

// Engagement
pub const ENGAGE_RANGE: f32 = 295.0;
pub const ENGAGE_RANGE_SQ: f32 = ENGAGE_RANGE * ENGAGE_RANGE;
// A rival counts as axis-aligned when either coordinate delta is within this.
pub const AXIS_ALIGN_TOLERANCE: f32 = 5.0;

// Model interface
pub const OBS_SIZE: usize = 2;
pub const AIM_ACTION_COUNT: usize = 4;
pub const CHASE_ACTION_COUNT: usize = 5;

// Model files (loaded once at startup from a fixed directory)
pub const AIM_MODEL_FILE: &str = "aim.onnx";
pub const CHASE_MODEL_FILE: &str = "chase.onnx";

// ONNX validation
pub const MAX_MODEL_SIZE_BYTES: usize = 50 * 1024 * 1024; // 50 MB
pub const MAX_PARAMETERS: usize = 10_000_000;
