use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::debug;

use super::platform::Platform;
use super::state::{
    transition, DefenseEvent, DefenseState, Effect, MonitorOptions, DEVTOOLS_POLL_MS,
    INTEGRITY_POLL_MS,
};
use crate::fingerprint::additive_checksum;

/// One controller per page load. Captures the integrity baseline at
/// construction, silences the console outside localhost, then runs its
/// two polls and the DOM event stream for the life of the session. There
/// is no reset path short of a full reload.
pub struct DefenseMonitor<P: Platform> {
    platform: P,
    state: DefenseState,
    options: MonitorOptions,
}

impl<P: Platform> DefenseMonitor<P> {
    pub fn new(platform: P) -> Self {
        Self::with_options(platform, MonitorOptions::default())
    }

    pub fn with_options(mut platform: P, options: MonitorOptions) -> Self {
        let baseline = additive_checksum(&platform.script_text());

        let hostname = platform.hostname();
        if hostname != "localhost" && hostname != "127.0.0.1" {
            platform.silence_console();
        }
        platform.suppress_selection();

        debug!("Defense monitor armed, baseline checksum {}", baseline);
        Self {
            platform,
            state: DefenseState::new(baseline),
            options,
        }
    }

    pub fn state(&self) -> &DefenseState {
        &self.state
    }

    /// Feeds one event through the transition core and applies the
    /// resulting effects to the platform.
    pub fn handle(&mut self, event: DefenseEvent) {
        let effects = transition(&mut self.state, event, &self.options);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ClearConsole => self.platform.clear_console(),
            Effect::ConsoleWarn(message) => self.platform.console_warn(&message),
            Effect::Notify { text, ttl_ms } => self.platform.notify(text, ttl_ms),
            Effect::PreventDefault => self.platform.prevent_default(),
            Effect::ReplaceDocument => self.platform.replace_document(),
        }
    }

    /// 500 ms tick and resize listener both land here.
    pub fn poll_dimensions(&mut self) {
        let delta = self.platform.dimension_delta();
        self.handle(DefenseEvent::DimensionPoll { delta });
    }

    /// 5000 ms tick: re-checksum the live script text against the
    /// construction-time baseline.
    pub fn poll_integrity(&mut self) {
        let checksum = additive_checksum(&self.platform.script_text());
        self.handle(DefenseEvent::IntegrityPoll { checksum });
    }

    /// Drives both periodic polls and the DOM event stream on one task,
    /// so all state mutation stays on a single thread. Runs until the
    /// event channel closes, the navigation-away analogue; neither poll
    /// has a cancellation path of its own.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<DefenseEvent>) {
        let mut devtools_tick = interval(Duration::from_millis(DEVTOOLS_POLL_MS));
        let mut integrity_tick = interval(Duration::from_millis(INTEGRITY_POLL_MS));

        loop {
            tokio::select! {
                _ = devtools_tick.tick() => self.poll_dimensions(),
                _ = integrity_tick.tick() => self.poll_integrity(),
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::state::ConsoleMessage;

    #[derive(Default)]
    struct FakePlatform {
        delta: i32,
        scripts: String,
        hostname: String,
        console_cleared: usize,
        warnings: Vec<String>,
        notifications: Vec<(String, u64)>,
        prevented: usize,
        replaced: usize,
        silenced: usize,
        selection_suppressed: usize,
    }

    impl FakePlatform {
        fn local(scripts: &str) -> Self {
            Self {
                scripts: scripts.to_string(),
                hostname: "localhost".to_string(),
                ..Default::default()
            }
        }
    }

    impl Platform for FakePlatform {
        fn dimension_delta(&self) -> i32 {
            self.delta
        }
        fn script_text(&self) -> String {
            self.scripts.clone()
        }
        fn hostname(&self) -> String {
            self.hostname.clone()
        }
        fn clear_console(&mut self) {
            self.console_cleared += 1;
        }
        fn console_warn(&mut self, message: &ConsoleMessage) {
            self.warnings.push(message.text.clone());
        }
        fn notify(&mut self, text: &str, ttl_ms: u64) {
            self.notifications.push((text.to_string(), ttl_ms));
        }
        fn prevent_default(&mut self) {
            self.prevented += 1;
        }
        fn replace_document(&mut self) {
            self.replaced += 1;
        }
        fn silence_console(&mut self) {
            self.silenced += 1;
        }
        fn suppress_selection(&mut self) {
            self.selection_suppressed += 1;
        }
    }

    #[test]
    fn test_construction_captures_baseline_and_suppresses_selection() {
        let monitor = DefenseMonitor::new(FakePlatform::local("var a = 1;"));
        assert_eq!(
            monitor.state().baseline_checksum,
            additive_checksum("var a = 1;")
        );
        assert_eq!(monitor.platform.selection_suppressed, 1);
        assert_eq!(monitor.platform.silenced, 0);
    }

    #[test]
    fn test_console_silenced_off_localhost() {
        let mut platform = FakePlatform::local("");
        platform.hostname = "app.example.com".to_string();
        let monitor = DefenseMonitor::new(platform);
        assert_eq!(monitor.platform.silenced, 1);
    }

    #[test]
    fn test_dimension_poll_applies_warning_effects() {
        let mut monitor = DefenseMonitor::new(FakePlatform::local(""));
        monitor.platform.delta = 300;
        monitor.poll_dimensions();

        assert_eq!(monitor.state().attempt_count, 1);
        assert_eq!(monitor.platform.console_cleared, 1);
        assert!(monitor
            .platform
            .warnings
            .iter()
            .any(|w| w.contains("ACCESO NO AUTORIZADO")));
    }

    #[test]
    fn test_integrity_poll_detects_mutation_each_tick() {
        let mut monitor = DefenseMonitor::new(FakePlatform::local("var a = 1;"));

        monitor.poll_integrity();
        assert!(monitor.platform.warnings.is_empty());

        monitor.platform.scripts = "var a = 2;".to_string();
        monitor.poll_integrity();
        monitor.poll_integrity();
        let tamper_warnings = monitor
            .platform
            .warnings
            .iter()
            .filter(|w| w.contains("MANIPULACIÓN"))
            .count();
        assert_eq!(tamper_warnings, 2);
        assert_eq!(monitor.platform.replaced, 0);
    }

    #[test]
    fn test_keydown_prevents_and_notifies_once() {
        let mut monitor = DefenseMonitor::new(FakePlatform::local(""));
        monitor.handle(DefenseEvent::KeyDown {
            key: "F12".to_string(),
            ctrl: false,
            shift: false,
        });

        assert_eq!(monitor.platform.prevented, 1);
        assert_eq!(monitor.platform.notifications.len(), 1);
        let (text, ttl) = &monitor.platform.notifications[0];
        assert_eq!(text, "Atajo de teclado deshabilitado");
        assert_eq!(*ttl, 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_on_schedule() {
        let mut platform = FakePlatform::local("var a = 1;");
        platform.delta = 300;
        let monitor = DefenseMonitor::new(platform);

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(monitor.run(rx));

        tokio::time::sleep(Duration::from_millis(600)).await;
        tx.send(DefenseEvent::Gesture(
            crate::monitor::state::GestureKind::SelectStart,
        ))
        .unwrap();
        drop(tx);

        task.await.unwrap();
    }
}
