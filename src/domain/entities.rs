//! Domain entities. Pure data structures for the macro model.
//!
//! No UI types here; adapters render these.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Opaque entry identifier. Issued by [`crate::domain::ActionList`] from a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub(crate) u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a macro step. Wire names are the snake_case variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SendMessage,
    SendPhoto,
    SendSticker,
    KickUser,
    MuteUser,
    WarnUser,
    DeleteMessage,
    PinMessage,
    SendDice,
    AddRole,
    RemoveRole,
    SetTitle,
    GetTopPosition,
    Robbery,
}

impl ActionKind {
    /// All kinds in menu order.
    pub const ALL: [ActionKind; 14] = [
        ActionKind::SendMessage,
        ActionKind::SendPhoto,
        ActionKind::SendSticker,
        ActionKind::KickUser,
        ActionKind::MuteUser,
        ActionKind::WarnUser,
        ActionKind::DeleteMessage,
        ActionKind::PinMessage,
        ActionKind::SendDice,
        ActionKind::AddRole,
        ActionKind::RemoveRole,
        ActionKind::SetTitle,
        ActionKind::GetTopPosition,
        ActionKind::Robbery,
    ];

    /// Wire name, as the bot expects it in `type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::SendMessage => "send_message",
            ActionKind::SendPhoto => "send_photo",
            ActionKind::SendSticker => "send_sticker",
            ActionKind::KickUser => "kick_user",
            ActionKind::MuteUser => "mute_user",
            ActionKind::WarnUser => "warn_user",
            ActionKind::DeleteMessage => "delete_message",
            ActionKind::PinMessage => "pin_message",
            ActionKind::SendDice => "send_dice",
            ActionKind::AddRole => "add_role",
            ActionKind::RemoveRole => "remove_role",
            ActionKind::SetTitle => "set_title",
            ActionKind::GetTopPosition => "get_top_position",
            ActionKind::Robbery => "robbery",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::SendMessage => "Отправить сообщение",
            ActionKind::SendPhoto => "Отправить фото",
            ActionKind::SendSticker => "Отправить стикер",
            ActionKind::KickUser => "Кикнуть пользователя",
            ActionKind::MuteUser => "Замутить пользователя",
            ActionKind::WarnUser => "Выдать предупреждение",
            ActionKind::DeleteMessage => "Удалить сообщение",
            ActionKind::PinMessage => "Закрепить сообщение",
            ActionKind::SendDice => "Отправить кубик",
            ActionKind::AddRole => "Выдать роль",
            ActionKind::RemoveRole => "Забрать роль",
            ActionKind::SetTitle => "Установить титул",
            ActionKind::GetTopPosition => "Узнать позицию в топе",
            ActionKind::Robbery => "Ограбление",
        }
    }

    /// Hint shown in the value input.
    pub fn placeholder(self) -> &'static str {
        match self {
            ActionKind::SendMessage => "Введите текст сообщения",
            ActionKind::SendPhoto => "Введите URL изображения",
            ActionKind::SendSticker => "Введите ID стикера",
            ActionKind::KickUser => "Причина (опционально)",
            ActionKind::MuteUser => "Длительность (например: 1h, 30m)",
            ActionKind::WarnUser => "Причина предупреждения",
            ActionKind::DeleteMessage => "Не требует параметров",
            ActionKind::PinMessage => "Текст для закрепления",
            ActionKind::SendDice => "Тип: dice, dart, basketball",
            ActionKind::AddRole => "Название роли",
            ActionKind::RemoveRole => "Название роли",
            ActionKind::SetTitle => "Новый титул пользователя",
            ActionKind::GetTopPosition => "Выберите топ и позицию",
            ActionKind::Robbery => "ID пользователя",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActionKind::SendMessage => "💬",
            ActionKind::SendPhoto => "🖼️",
            ActionKind::SendSticker => "🎨",
            ActionKind::KickUser => "👢",
            ActionKind::MuteUser => "🔇",
            ActionKind::WarnUser => "⚠️",
            ActionKind::DeleteMessage => "🗑️",
            ActionKind::PinMessage => "📌",
            ActionKind::SendDice => "🎲",
            ActionKind::AddRole => "⭐",
            ActionKind::RemoveRole => "❌",
            ActionKind::SetTitle => "👑",
            ActionKind::GetTopPosition => "🏆",
            ActionKind::Robbery => "🥷",
        }
    }

    /// Kinds that are complete without a parameter.
    pub fn requires_value(self) -> bool {
        !matches!(self, ActionKind::DeleteMessage)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaderboard a `get_top_position` step reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopType {
    Balance,
    Charity,
    DigitalCoins,
    Messages,
    Level,
}

impl TopType {
    pub const ALL: [TopType; 5] = [
        TopType::Balance,
        TopType::Charity,
        TopType::DigitalCoins,
        TopType::Messages,
        TopType::Level,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TopType::Balance => "Баланс",
            TopType::Charity => "Благотворительность",
            TopType::DigitalCoins => "Цифровые монеты",
            TopType::Messages => "Сообщения",
            TopType::Level => "Уровень",
        }
    }

    /// Only the messages top is split into local and global boards.
    pub fn has_scope(self) -> bool {
        matches!(self, TopType::Messages)
    }
}

/// Messages top scope (`subType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopScope {
    Local,
    Global,
}

impl TopScope {
    pub fn messages_label(self) -> &'static str {
        match self {
            TopScope::Local => "Сообщения (локальный)",
            TopScope::Global => "Сообщения (глобальный)",
        }
    }
}

/// Requested rank: a concrete place or the invoking user's own (`{me}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopPosition {
    Me,
    Rank(NonZeroU32),
}

impl TopPosition {
    pub const ME_LITERAL: &'static str = "{me}";
}

impl fmt::Display for TopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopPosition::Me => f.write_str(Self::ME_LITERAL),
            TopPosition::Rank(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for TopPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::ME_LITERAL {
            return Ok(TopPosition::Me);
        }
        s.parse::<NonZeroU32>()
            .map(TopPosition::Rank)
            .map_err(|_| format!("expected a positive integer or {}, got {:?}", Self::ME_LITERAL, s))
    }
}

impl Serialize for TopPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TopPosition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Structured query of a `get_top_position` step. Fields stay optional while the
/// user is filling them in; the validator reports whichever is missing first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopSelection {
    pub top_type: Option<TopType>,
    pub sub_type: Option<TopScope>,
    pub position: Option<TopPosition>,
}

impl TopSelection {
    pub fn new(top_type: TopType, sub_type: Option<TopScope>, position: TopPosition) -> Self {
        Self {
            top_type: Some(top_type),
            sub_type,
            position: Some(position),
        }
    }

    /// Drops a scope that does not apply to the chosen top.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.top_type.is_some_and(TopType::has_scope) {
            self.sub_type = None;
        }
        self
    }

    /// Human-readable label, e.g. `Баланс, #3` or `Сообщения (глобальный), моя позиция`.
    /// `None` until top type and position are chosen.
    pub fn display(&self) -> Option<String> {
        let top_type = self.top_type?;
        let position = self.position?;
        let label = match (top_type, self.sub_type) {
            (TopType::Messages, Some(scope)) => scope.messages_label(),
            (t, _) => t.label(),
        };
        Some(match position {
            TopPosition::Me => format!("{}, моя позиция", label),
            TopPosition::Rank(n) => format!("{}, #{}", label, n),
        })
    }

    pub fn is_balance(&self) -> bool {
        self.top_type == Some(TopType::Balance)
    }
}

/// Reserved values resolved by the bot at execution time from an earlier top query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{topresult}`: text result of the query, used by `send_message`.
    TopResult,
    /// `{topresultID}`: user id at the queried balance rank, used by `robbery`.
    TopResultId,
}

impl Placeholder {
    pub fn literal(self) -> &'static str {
        match self {
            Placeholder::TopResult => "{topresult}",
            Placeholder::TopResultId => "{topresultID}",
        }
    }

    /// Exact match only; text merely containing a literal is ordinary text.
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "{topresult}" => Some(Placeholder::TopResult),
            "{topresultID}" => Some(Placeholder::TopResultId),
            _ => None,
        }
    }

    /// The only kind allowed to hold this placeholder.
    pub fn host_kind(self) -> ActionKind {
        match self {
            Placeholder::TopResult => ActionKind::SendMessage,
            Placeholder::TopResultId => ActionKind::Robbery,
        }
    }

    pub fn for_kind(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::SendMessage => Some(Placeholder::TopResult),
            ActionKind::Robbery => Some(Placeholder::TopResultId),
            _ => None,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// Parameter of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionValue {
    #[default]
    Empty,
    Text(String),
    Placeholder(Placeholder),
    Top(TopSelection),
}

impl ActionValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ActionValue::Empty => true,
            ActionValue::Text(s) => s.is_empty(),
            ActionValue::Placeholder(_) | ActionValue::Top(_) => false,
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            ActionValue::Placeholder(p) => Some(*p),
            _ => None,
        }
    }

    pub fn top_selection(&self) -> Option<&TopSelection> {
        match self {
            ActionValue::Top(sel) => Some(sel),
            _ => None,
        }
    }
}

/// One step of the macro. Its position in the list is not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub id: ActionId,
    pub kind: Option<ActionKind>,
    pub value: ActionValue,
}

impl ActionEntry {
    pub(crate) fn empty(id: ActionId) -> Self {
        Self {
            id,
            kind: None,
            value: ActionValue::Empty,
        }
    }

    /// Whether this entry makes `placeholder` legal in entries after it.
    pub fn enables(&self, placeholder: Placeholder) -> bool {
        if self.kind != Some(ActionKind::GetTopPosition) {
            return false;
        }
        match placeholder {
            Placeholder::TopResult => true,
            Placeholder::TopResultId => self
                .value
                .top_selection()
                .is_some_and(TopSelection::is_balance),
        }
    }

    pub fn is_top_query(&self) -> bool {
        self.kind == Some(ActionKind::GetTopPosition)
    }
}
