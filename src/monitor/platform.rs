use super::state::ConsoleMessage;

/// Capability interface over the hosting environment. Everything the
/// monitor reads from or does to the page goes through this trait, so the
/// transition logic runs headless in tests and alternative detection
/// signals can be substituted without touching the policy.
///
/// Implementor contracts:
/// - `notify` elements self-remove after `ttl_ms` and an implementation
///   must check for an existing notification element by identifier before
///   creating a duplicate: the same transition can fire from both the
///   dimension poll and the resize listener on the same thread.
/// - `suppress_selection` injects the selection-disabling style once;
///   repeat calls must not stack elements.
pub trait Platform: Send {
    /// `max(outerHeight - innerHeight, outerWidth - innerWidth)`.
    fn dimension_delta(&self) -> i32;

    /// Concatenated text content of all script elements on the page.
    fn script_text(&self) -> String;

    fn hostname(&self) -> String;

    fn clear_console(&mut self);

    fn console_warn(&mut self, message: &ConsoleMessage);

    fn notify(&mut self, text: &str, ttl_ms: u64);

    /// Cancels the default action of the event currently being handled.
    fn prevent_default(&mut self);

    /// Replaces the whole document with the access-denied page. Only
    /// reachable through the destructive opt-in.
    fn replace_document(&mut self);

    /// Swaps every console method for a no-op. Called once at
    /// construction outside localhost, never re-evaluated.
    fn silence_console(&mut self);

    fn suppress_selection(&mut self);
}
