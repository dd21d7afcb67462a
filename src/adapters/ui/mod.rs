pub mod banner;
pub mod notifier;
pub mod tui;

pub use notifier::ConsoleNotifier;
pub use tui::TuiInputPort;

/// Prints the welcome banner and applies the accent theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui(bot_url: &str) {
    banner::print_welcome(bot_url);
    tui::apply_theme();
}
