//! Pure transition core for the defense monitor.
//!
//! All escalation policy lives here as `(state, event) -> effects`
//! functions with no timers and no environment access, so the policy is
//! testable without a live rendering environment. The controller owns the
//! clock and the platform; this module owns the rules.

use serde::Serialize;

/// Dimension delta above which an open inspector panel is inferred.
/// Legitimate resizes and browser chrome changes can cross it too; the
/// heuristic tolerates those false positives by never blocking input.
pub const DIMENSION_THRESHOLD: i32 = 160;

pub const DEVTOOLS_POLL_MS: u64 = 500;
pub const INTEGRITY_POLL_MS: u64 = 5000;
pub const NOTIFICATION_TTL_MS: u64 = 3000;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub max_attempts: u32,
    /// Opt-in: replace the whole document once attempts exceed the limit
    /// or tampering is detected. Off by default; messaging only.
    pub destructive: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            destructive: false,
        }
    }
}

/// Lives for the page session. Never persisted; never reset short of a
/// full page reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefenseState {
    pub devtools_open: bool,
    pub attempt_count: u32,
    pub baseline_checksum: i64,
}

impl DefenseState {
    pub fn new(baseline_checksum: i64) -> Self {
        Self {
            devtools_open: false,
            attempt_count: 0,
            baseline_checksum,
        }
    }

    pub fn phase(&self, max_attempts: u32) -> Phase {
        if self.attempt_count > max_attempts {
            Phase::Blocked
        } else if self.attempt_count > 0 {
            Phase::Escalated
        } else if self.devtools_open {
            Phase::Suspected
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Suspected,
    Escalated,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    ContextMenu,
    SelectStart,
    DragStart,
    DragOver,
    Drop,
}

#[derive(Debug, Clone)]
pub enum DefenseEvent {
    /// 500 ms poll or window resize; `delta` is
    /// `max(outerHeight - innerHeight, outerWidth - innerWidth)`.
    DimensionPoll { delta: i32 },
    /// 5000 ms poll over the concatenated live script text.
    IntegrityPoll { checksum: i64 },
    KeyDown {
        key: String,
        ctrl: bool,
        shift: bool,
    },
    Gesture(GestureKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub text: String,
    pub style: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearConsole,
    ConsoleWarn(ConsoleMessage),
    Notify {
        text: &'static str,
        ttl_ms: u64,
    },
    PreventDefault,
    ReplaceDocument,
}

pub const SHORTCUT_DISABLED_TEXT: &str = "Atajo de teclado deshabilitado";
pub const RIGHT_CLICK_DISABLED_TEXT: &str = "Clic derecho deshabilitado";

/// Applies one event to the state, returning the observable side effects
/// in order. The only mutation paths are the closed→open dimension
/// transition (which is the only place `attempt_count` grows) and the
/// open→closed reset of the flag.
pub fn transition(
    state: &mut DefenseState,
    event: DefenseEvent,
    options: &MonitorOptions,
) -> Vec<Effect> {
    match event {
        DefenseEvent::DimensionPoll { delta } => dimension_poll(state, delta, options),
        DefenseEvent::IntegrityPoll { checksum } => integrity_poll(state, checksum, options),
        DefenseEvent::KeyDown { key, ctrl, shift } => key_down(&key, ctrl, shift),
        DefenseEvent::Gesture(kind) => gesture(kind),
    }
}

fn dimension_poll(state: &mut DefenseState, delta: i32, options: &MonitorOptions) -> Vec<Effect> {
    if delta <= DIMENSION_THRESHOLD {
        state.devtools_open = false;
        return Vec::new();
    }
    if state.devtools_open {
        // Sustained-open ticks never re-increment.
        return Vec::new();
    }

    state.devtools_open = true;
    state.attempt_count += 1;

    let mut effects = vec![Effect::ClearConsole];
    if state.attempt_count <= options.max_attempts {
        effects.push(Effect::ConsoleWarn(ConsoleMessage {
            text: "⚠️ ACCESO NO AUTORIZADO DETECTADO ⚠️".to_string(),
            style: "color: red; font-size: 24px; font-weight: bold;",
        }));
        effects.push(Effect::ConsoleWarn(ConsoleMessage {
            text: "Las herramientas de desarrollador están deshabilitadas para proteger la propiedad intelectual.".to_string(),
            style: "color: orange; font-size: 16px;",
        }));
        effects.push(Effect::ConsoleWarn(ConsoleMessage {
            text: format!(
                "Intento {} de {}",
                state.attempt_count, options.max_attempts
            ),
            style: "color: yellow; font-size: 14px;",
        }));
    } else {
        effects.push(Effect::ConsoleWarn(ConsoleMessage {
            text: "🚫 ACCESO BLOQUEADO 🚫".to_string(),
            style: "color: red; font-size: 28px; font-weight: bold;",
        }));
        effects.push(Effect::ConsoleWarn(ConsoleMessage {
            text: "Se ha detectado un intento de acceso no autorizado múltiples veces.".to_string(),
            style: "color: red; font-size: 16px;",
        }));
        if options.destructive {
            effects.push(Effect::ReplaceDocument);
        }
    }
    effects
}

fn integrity_poll(state: &mut DefenseState, checksum: i64, options: &MonitorOptions) -> Vec<Effect> {
    if checksum == state.baseline_checksum {
        return Vec::new();
    }

    // The baseline is never updated, so a persisting mismatch fires on
    // every tick.
    let mut effects = vec![
        Effect::ClearConsole,
        Effect::ConsoleWarn(ConsoleMessage {
            text: "🚨 MANIPULACIÓN DETECTADA 🚨".to_string(),
            style: "color: red; font-size: 24px; font-weight: bold;",
        }),
        Effect::ConsoleWarn(ConsoleMessage {
            text: "Se ha detectado una modificación no autorizada del código.".to_string(),
            style: "color: red; font-size: 16px;",
        }),
    ];
    if options.destructive {
        effects.push(Effect::ReplaceDocument);
    }
    effects
}

fn key_down(key: &str, ctrl: bool, shift: bool) -> Vec<Effect> {
    let blocked = key == "F12"
        || (ctrl && shift && (key == "I" || key == "J"))
        || (ctrl && key == "U");
    if !blocked {
        return Vec::new();
    }
    vec![
        Effect::PreventDefault,
        Effect::Notify {
            text: SHORTCUT_DISABLED_TEXT,
            ttl_ms: NOTIFICATION_TTL_MS,
        },
    ]
}

fn gesture(kind: GestureKind) -> Vec<Effect> {
    let mut effects = vec![Effect::PreventDefault];
    if kind == GestureKind::ContextMenu {
        effects.push(Effect::Notify {
            text: RIGHT_CLICK_DISABLED_TEXT,
            ttl_ms: NOTIFICATION_TTL_MS,
        });
    }
    effects
}
