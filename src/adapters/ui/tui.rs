//! Implements InputPort. Inquire-based interactive macro builder.
//!
//! Menu loop over the session: trigger, add/edit/remove actions, create, reset.
//! Esc backs out of a sub-prompt; Esc or Ctrl-C on the main menu quits.

use crate::adapters::ui::banner::ACCENT;
use crate::adapters::ui::notifier::{Severity, print_toast};
use crate::domain::{
    ActionEntry, ActionId, ActionKind, ActionValue, DomainError, MAX_ACTIONS, MacroLink,
    Placeholder, TopPosition, TopScope, TopSelection, TopType,
};
use crate::ports::InputPort;
use crate::usecases::MacroSession;
use inquire::error::InquireResult;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use tracing::debug;

/// Applies the accent color to all subsequent inquire prompts.
pub fn apply_theme() {
    let accent = Color::Rgb {
        r: ACCENT.0,
        g: ACCENT.1,
        b: ACCENT.2,
    };
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(accent));
    inquire::set_global_render_config(config);
}

/// Short description of an entry's value for menus.
pub fn describe_value(entry: &ActionEntry) -> String {
    match &entry.value {
        ActionValue::Empty if entry.kind.is_some_and(|k| !k.requires_value()) => String::new(),
        ActionValue::Empty => "(empty)".to_string(),
        ActionValue::Text(s) => {
            let mut short: String = s.chars().take(32).collect();
            if short.len() < s.len() {
                short.push('…');
            }
            format!("{:?}", short)
        }
        ActionValue::Placeholder(p) => p.literal().to_string(),
        ActionValue::Top(sel) => sel
            .display()
            .unwrap_or_else(|| "(incomplete top query)".to_string()),
    }
}

fn describe_entry(position: usize, entry: &ActionEntry) -> String {
    match entry.kind {
        Some(kind) => format!(
            "{}. {} {} {}",
            position + 1,
            kind.icon(),
            kind.label(),
            describe_value(entry)
        )
        .trim_end()
        .to_string(),
        None => format!("{}. (no type)", position + 1),
    }
}

enum MenuItem {
    SetTrigger(String),
    AddAction,
    EditAction(ActionId, String),
    RemoveAction(ActionId, usize),
    CreateMacro,
    Reset,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::SetTrigger(t) if t.is_empty() => write!(f, "Set trigger"),
            MenuItem::SetTrigger(t) => write!(f, "Set trigger (/{})", t),
            MenuItem::AddAction => write!(f, "Add action"),
            MenuItem::EditAction(_, summary) => write!(f, "Edit {}", summary),
            MenuItem::RemoveAction(_, position) => write!(f, "Remove action {}", position + 1),
            MenuItem::CreateMacro => write!(f, "Create macro"),
            MenuItem::Reset => write!(f, "Start over"),
            MenuItem::Quit => write!(f, "Quit"),
        }
    }
}

struct KindChoice(ActionKind);

impl fmt::Display for KindChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.icon(), self.0.label())
    }
}

struct TopChoice(TopType);

impl fmt::Display for TopChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

struct ScopeChoice(TopScope);

impl fmt::Display for ScopeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.messages_label())
    }
}

enum ValueMode {
    Text,
    Insert(Placeholder),
}

impl fmt::Display for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMode::Text => write!(f, "Enter text"),
            ValueMode::Insert(p) => write!(f, "Insert {}", p),
        }
    }
}

/// `me`, `я` and `{me}` all mean the user's own position.
fn parse_position(raw: &str) -> Result<TopPosition, DomainError> {
    match raw.trim().to_lowercase().as_str() {
        "me" | "я" => Ok(TopPosition::Me),
        other => other.parse().map_err(DomainError::InvalidPosition),
    }
}

/// Esc/Ctrl-C inside a sub-prompt returns to the menu.
fn answer<T>(result: InquireResult<T>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// TUI adapter. Owns the session it drives.
pub struct TuiInputPort {
    session: MacroSession,
}

impl TuiInputPort {
    pub fn new(mut session: MacroSession) -> Self {
        if session.actions().is_empty() {
            session.add_action();
        }
        Self { session }
    }

    fn menu(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::SetTrigger(self.session.trigger().to_string())];
        for (position, entry) in self.session.actions().iter().enumerate() {
            items.push(MenuItem::EditAction(
                entry.id,
                describe_entry(position, entry),
            ));
        }
        if self.session.actions().len() < MAX_ACTIONS {
            items.push(MenuItem::AddAction);
        }
        // The first action stays; later ones can be removed.
        for (position, entry) in self.session.actions().iter().enumerate().skip(1) {
            items.push(MenuItem::RemoveAction(entry.id, position));
        }
        items.extend([MenuItem::CreateMacro, MenuItem::Reset, MenuItem::Quit]);
        items
    }

    fn edit_trigger(&mut self) -> Result<(), DomainError> {
        let current = self.session.trigger().to_string();
        let Some(raw) = answer(
            Text::new("Trigger command:")
                .with_placeholder("например: ограбить")
                .with_initial_value(&current)
                .with_help_message("letters, digits and _; at least 2 characters")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        self.session.set_trigger(raw.trim());
        Ok(())
    }

    fn edit_action(&mut self, id: ActionId) -> Result<(), DomainError> {
        let current = self.session.action(id).and_then(|e| e.kind);
        let cursor = current
            .and_then(|k| ActionKind::ALL.iter().position(|&c| c == k))
            .unwrap_or(0);
        let choices: Vec<KindChoice> = ActionKind::ALL.into_iter().map(KindChoice).collect();
        let Some(KindChoice(kind)) = answer(
            Select::new("Action type:", choices)
                .with_starting_cursor(cursor)
                .with_page_size(ActionKind::ALL.len())
                .prompt(),
        )?
        else {
            return Ok(());
        };
        if current != Some(kind) {
            self.session.set_action_type(id, Some(kind))?;
        }

        match kind {
            ActionKind::DeleteMessage => Ok(()),
            ActionKind::GetTopPosition => self.edit_top_selection(id),
            _ => self.edit_text_value(id, kind),
        }
    }

    fn edit_text_value(&mut self, id: ActionId, kind: ActionKind) -> Result<(), DomainError> {
        if let Some(placeholder) = self.session.available_placeholder(id) {
            let modes = vec![ValueMode::Text, ValueMode::Insert(placeholder)];
            match answer(Select::new("Value:", modes).prompt())? {
                None => return Ok(()),
                Some(ValueMode::Insert(p)) => return self.session.insert_placeholder(id, p),
                Some(ValueMode::Text) => {}
            }
        }
        let Some(text) = answer(
            Text::new(&format!("{}:", kind.label()))
                .with_placeholder(kind.placeholder())
                .prompt(),
        )?
        else {
            return Ok(());
        };
        self.session.set_action_value(id, &text)
    }

    fn edit_top_selection(&mut self, id: ActionId) -> Result<(), DomainError> {
        let tops: Vec<TopChoice> = TopType::ALL.into_iter().map(TopChoice).collect();
        let Some(TopChoice(top_type)) = answer(Select::new("Top:", tops).prompt())? else {
            return Ok(());
        };
        let sub_type = if top_type.has_scope() {
            let scopes = vec![ScopeChoice(TopScope::Local), ScopeChoice(TopScope::Global)];
            let Some(ScopeChoice(scope)) = answer(Select::new("Scope:", scopes).prompt())? else {
                return Ok(());
            };
            Some(scope)
        } else {
            None
        };
        let Some(raw) = answer(
            Text::new("Position:")
                .with_placeholder("1, 2, 3… or me")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let position = parse_position(&raw)?;
        self.session
            .set_top_selection(id, TopSelection::new(top_type, sub_type, position))
    }

    fn print_link(link: &MacroLink) {
        println!();
        println!("  Command:  {}", link.command());
        println!("  Actions:  {}", link.action_count);
        println!("  Install:  {}", link.url);
        println!();
    }

    /// Runs one menu choice. Returns false when the user quits.
    fn handle(&mut self, item: MenuItem) -> Result<bool, DomainError> {
        match item {
            MenuItem::SetTrigger(_) => self.edit_trigger()?,
            MenuItem::AddAction => {
                if let Some(id) = self.session.add_action() {
                    self.edit_action(id)?;
                }
            }
            MenuItem::EditAction(id, _) => self.edit_action(id)?,
            MenuItem::RemoveAction(id, _) => self.session.remove_action(id)?,
            MenuItem::CreateMacro => {
                let link = self.session.create_macro()?;
                Self::print_link(&link);
            }
            MenuItem::Reset => self.session.reset(),
            MenuItem::Quit => return Ok(false),
        }
        Ok(true)
    }
}

impl InputPort for TuiInputPort {
    fn run(&mut self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("Macro:", self.menu()).prompt() {
                Ok(item) => item,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };
            match self.handle(choice) {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                // Already shown by the notifier.
                Err(DomainError::Validation(_)) => {}
                Err(DomainError::Ui(e)) => return Err(DomainError::Ui(e)),
                Err(e) => {
                    debug!(error = %e, "action rejected");
                    print_toast(Severity::Error, &e.to_string());
                }
            }
        }
    }
}
