mod controller;
mod platform;
mod state;

pub use controller::DefenseMonitor;
pub use platform::Platform;
pub use state::{
    transition, ConsoleMessage, DefenseEvent, DefenseState, Effect, GestureKind, MonitorOptions,
    Phase, DEFAULT_MAX_ATTEMPTS, DEVTOOLS_POLL_MS, DIMENSION_THRESHOLD, INTEGRITY_POLL_MS,
    NOTIFICATION_TTL_MS, RIGHT_CLICK_DISABLED_TEXT, SHORTCUT_DISABLED_TEXT,
};
