/// Frame timing, simulation and interaction tuning constants.
///
/// These constants express intended behavior (decay rates, clamp limits,
/// spawn gates) and keep magic numbers out of the simulation code.

// Frame clock
pub const REFERENCE_FPS: f32 = 60.0; // per-frame rates below are expressed against this
pub const NOMINAL_FRAME_DT: f32 = 1.0 / REFERENCE_FPS;
pub const MAX_FRAME_DT: f32 = 0.25; // clamp for backgrounded tabs / long stalls
pub const INPUT_QUEUE_CAPACITY: usize = 64; // pointer events buffered between frames

// Piecewise tracks
pub const CONTINUITY_TOLERANCE: f32 = 1e-3; // max allowed jump at a segment boundary
pub const ZERO_SPAN_EPSILON: f32 = 1e-6; // shorter segments/fades are instantaneous steps

// Camera
pub const CAMERA_LAG_RATE: f32 = 0.15; // fraction of remaining distance per reference frame
pub const CAMERA_SNAP_EPSILON: f32 = 1e-4; // snap to target once this close
pub const CAMERA_TWEEN_SEC: f32 = 0.5;
pub const CAMERA_RETARGET_EPSILON: f32 = 1e-5; // target changes smaller than this keep the tween

// Ripples
pub const RIPPLE_LAYERS: usize = 3;
pub const RIPPLE_BASE_MAX_RADIUS: f32 = 80.0;
pub const RIPPLE_MAX_RADIUS_PER_LAYER: f32 = 40.0;
pub const RIPPLE_MAX_RADIUS_JITTER: f32 = 30.0;
pub const RIPPLE_BASE_OPACITY: f32 = 0.6;
pub const RIPPLE_OPACITY_PER_LAYER: f32 = 0.15;
pub const RIPPLE_BASE_SPEED: f32 = 1.5; // px per reference frame
pub const RIPPLE_SPEED_PER_LAYER: f32 = 0.3;
pub const RIPPLE_SPEED_JITTER: f32 = 0.5;
pub const RIPPLE_DECAY_PER_FRAME: f32 = 0.985;
pub const RIPPLE_OPACITY_EPSILON: f32 = 0.01;
pub const RIPPLE_BORDER_PADDING: f32 = 40.0; // px from any edge counts as "near the border"
pub const RIPPLE_MIN_SPAWN_DISTANCE: f32 = 15.0; // px the pointer must travel between spawns
pub const RIPPLE_ENTER_BURST: usize = 2;
pub const RIPPLE_ENTER_STAGGER_SEC: f32 = 0.05;
pub const RIPPLE_ENTER_JITTER: f32 = 10.0; // +/- px around the entry point
pub const RIPPLE_MAX_LIVE: usize = 200;
pub const RIPPLE_MAX_PENDING: usize = 16;

// Ripple rendering
pub const RIPPLE_HUE: f32 = 48.0; // golden
pub const RIPPLE_RINGS: usize = 3;
pub const RIPPLE_RING_SPACING: f32 = 8.0;
pub const RIPPLE_RING_FADE: f32 = 0.25; // opacity lost per inner ring
pub const RIPPLE_RING_HALF_WIDTH: f32 = 3.0;
pub const RIPPLE_STROKE_BASE: f32 = 4.0;

// Wave layers
pub const WAVE_TIME_SCALE: f32 = 2.0; // phase units per second
pub const WAVE_SAMPLE_STEP: f32 = 2.0; // px between waterline samples
pub const WAVE_REFLECTION_RADIUS: f32 = 80.0;
pub const WAVE_FILTER_TIME_SCALE: f32 = 0.9; // turbulence clock per second
pub const WAVE_DISTURBANCE_MAX: usize = 8;
pub const WAVE_DISTURBANCE_LIFETIME_SEC: f32 = 2.0;
pub const WAVE_DISTURBANCE_SPAWN_CHANCE: f64 = 0.1;
pub const WAVE_DISTURBANCE_GAIN: f32 = 30.0;

// Card tilt springs
pub const TILT_INTENSITY_DEG: f32 = 15.0;
pub const TILT_STIFFNESS: f32 = 150.0;
pub const TILT_DAMPING: f32 = 20.0;
pub const TILT_MASS: f32 = 0.5;
pub const WAVE_INTENSITY_STIFFNESS: f32 = 100.0;
pub const WAVE_INTENSITY_DAMPING: f32 = 15.0;
pub const SPRING_MAX_SUBSTEP_SEC: f32 = 1.0 / 120.0;
pub const SPRING_REST_EPSILON: f32 = 1e-3;

// Scene props
pub const IDLE_BOB_AMPLITUDE: f32 = 0.1;
pub const IDLE_BOB_RATE: f32 = 0.5;
pub const IDLE_ROLL_AMPLITUDE: f32 = 0.05;
pub const IDLE_ROLL_RATE: f32 = 0.3;
pub const PEEL_LEAVES: usize = 4;
pub const MINI_OBJECTS_THRESHOLD: f32 = 0.6;
pub const PARTICLE_DRIFT: f32 = 10.0;
