//! Line rendering: `[LEVEL][TAG] message`

use super::traits::LogRecord;
use crate::level::Level;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

/// ANSI foreground color for a level's tag
pub fn level_color(level: Level) -> &'static str {
    match level {
        Level::Trace | Level::Debug => "\x1b[35m",
        Level::Info => "\x1b[36m",
        Level::Warn => "\x1b[33m",
        Level::Error => "\x1b[31m",
    }
}

/// Render a record without a trailing newline
///
/// With `colors` the level tag is colored and the category tag dimmed;
/// the message text is never altered.
pub fn render(record: &LogRecord<'_>, colors: bool) -> String {
    let label = record.level.label();
    if colors {
        format!(
            "{}[{}]{}{}[{}]{} {}",
            level_color(record.level),
            label,
            RESET,
            DIM,
            record.tag,
            RESET,
            record.message
        )
    } else {
        format!("[{}][{}] {}", label, record.tag, record.message)
    }
}
