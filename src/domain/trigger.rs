//! Trigger word rules: the command that activates a macro in the bot.

/// Minimum trigger length in characters.
pub const MIN_TRIGGER_LEN: usize = 2;

/// ASCII letters, digits, underscore, and the Russian alphabet (including ё/Ё).
pub fn is_trigger_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ('а'..='я').contains(&c)
        || ('А'..='Я').contains(&c)
        || c == 'ё'
        || c == 'Ё'
}

/// Strips every character the trigger field would reject at input time.
pub fn sanitize_trigger(raw: &str) -> String {
    raw.chars().filter(|&c| is_trigger_char(c)).collect()
}
