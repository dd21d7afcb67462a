//! Implements ModelObserver. Colored one-line toasts for events the user must see.

use crate::adapters::ui::banner::ACCENT;
use crate::domain::ModelEvent;
use crate::ports::ModelObserver;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        let (r, g, b) = match self {
            Severity::Info => ACCENT,
            Severity::Warning => (0xf5, 0x9e, 0x0b),
            Severity::Error => (0xef, 0x44, 0x44),
        };
        Color::Rgb { r, g, b }
    }
}

/// Message for events worth a toast; structural events (added, type changed) render silently.
pub fn toast_for(event: &ModelEvent) -> Option<(Severity, String)> {
    match event {
        ModelEvent::CapacityReached { max } => Some((
            Severity::Warning,
            format!("Достигнуто максимальное количество действий ({})", max),
        )),
        ModelEvent::TriggerChanged {
            trigger,
            stripped: true,
        } => Some((
            Severity::Warning,
            format!(
                "Only letters, digits and _ are allowed; trigger kept as \"{}\"",
                trigger
            ),
        )),
        ModelEvent::ValueCleared { id, placeholder } => Some((
            Severity::Warning,
            format!(
                "Action {} lost {}: its top query was removed",
                id, placeholder
            ),
        )),
        ModelEvent::ValidationFailed(e) => Some((Severity::Error, e.to_string())),
        ModelEvent::MacroCreated(link) => Some((
            Severity::Info,
            format!(
                "Macro {} created ({} actions)",
                link.command(),
                link.action_count
            ),
        )),
        _ => None,
    }
}

/// Console notifier. Writes toasts to stdout between prompts.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ModelObserver for ConsoleNotifier {
    fn notify(&self, event: &ModelEvent) {
        if let Some((severity, message)) = toast_for(event) {
            print_toast(severity, &message);
        }
    }
}

pub fn print_toast(severity: Severity, message: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(severity.color()));
    let _ = out.execute(Print(format!("● {}\r\n", message)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
