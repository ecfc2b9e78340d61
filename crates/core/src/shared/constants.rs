/// Smiling probability above which a face is rejected.
pub const SMILE_THRESHOLD: f32 = 0.4;

/// Eye-open probability below which an eye counts as closed.
pub const BLINK_THRESHOLD: f32 = 0.5;

/// Allowed distance of the face center from the overlay center, as a
/// fraction of overlay width/height.
pub const CENTER_TOLERANCE: f32 = 0.4;

/// Times the same notice may be shown before a different one must interrupt.
pub const MAX_MESSAGE_REPEATS: u32 = 2;

pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

pub const BOX_STROKE_WIDTH: f32 = 5.0;

pub const CONFIG_DIR_NAME: &str = "livecheck";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// How long stop waits for an in-flight detection before detaching the worker.
pub const SHUTDOWN_GRACE: std::time::Duration = std::time::Duration::from_millis(500);
