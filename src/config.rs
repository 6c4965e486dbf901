pub const SIM_HZ: f64 = 60.0;
pub const RENDER_HZ: f64 = 30.0;
pub const DT: f64 = 1.0 / SIM_HZ;

pub const WORLD_HALF_WIDTH: f64 = 600.0;
pub const WORLD_HALF_HEIGHT: f64 = 300.0;

pub const GRAVITATIONAL_CONSTANT: f64 = 40.0;
pub const SMOOTHING: f64 = 0.5;
pub const TIME_SCALE: f64 = 0.2;

pub const BODY_TIME_SCALE: f64 = 0.008;
pub const BODY_FRICTION: f64 = 0.99;
pub const BODY_MAX_VELOCITY: f64 = 50.0;

// A body leaving the viewport re-enters just inside the opposite edge,
// not exactly on it.
pub const WRAP_OVERSHOOT: f64 = 30.0;
pub const WRAP_INSET: f64 = 10.0;

pub const INIT_BODIES: usize = 100;
pub const SPAWN_RADIUS_MIN: f64 = 200.0;
pub const SPAWN_RADIUS_SPREAD: f64 = 200.0;
pub const SPAWN_SPEED: f64 = 10.0;
pub const SPAWN_MASS_BASE: f64 = -10.0;
pub const SPAWN_MASS_SPREAD: f64 = 15.0;
pub const SPAWN_SIZE_BASE: f64 = 1.0;
pub const SPAWN_SIZE_SPREAD: f64 = 10.0;

pub const CURSOR_MASS: f64 = -1000.0;
pub const CURSOR_SIZE: f64 = 50.0;

pub const LINK_THRESHOLD_SQ: f64 = 20000.0;

pub const G_STEP: f64 = 5.0;
