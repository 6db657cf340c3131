// Shared placement/visual tuning constants used by the core and the native driver.

// Marker body
pub const MARKER_RADIUS: f32 = 0.15; // sphere radius in meters
pub const MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 0.75]; // translucent red
pub const MARKER_METALLIC: f32 = 0.0;
pub const MARKER_ROUGHNESS: f32 = 0.4;

// Distance label
pub const LABEL_OFFSET_Y: f32 = MARKER_RADIUS + 0.1; // label floats just above the sphere
pub const LABEL_PREFIX: &str = "X:";

// Vertical plane overlays
pub const PLANE_OVERLAY_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 0.2]; // translucent green
pub const PLANE_OVERLAY_METALLIC: f32 = 0.0;
pub const PLANE_OVERLAY_ROUGHNESS: f32 = 1.0;
pub const PLANE_OVERLAY_THICKNESS: f32 = 1.0; // overlay mesh is already flat; Y scale stays unit

// Logging cadence (once per second at 60fps)
pub const PLANE_STATUS_LOG_INTERVAL_FRAMES: u64 = 60;

// Status line
pub const STATUS_TRACKING: &str = "Tracking";
pub const STATUS_PAUSED: &str = "Tracking Paused";
pub const STATUS_STOPPED: &str = "Tracking Stopped";
pub const STATUS_NOT_TRACKING: &str = "Not tracking";
pub const COORDS_INITIALIZING: &str = "Initializing AR...";
