use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Prompt,
    Section,
    Detail,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Drop colors, used for scripted runs and screen readers.
    pub plain: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Prompt => ">",
        MessageKind::Section | MessageKind::Detail => "",
    }
}

pub(crate) fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Detail => format!("  {}", text),
        _ => format!("{} {}", build_label(kind), text),
    };

    if prefs.plain {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Prompt => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Detail => formatted.dimmed().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn prompt(message: impl fmt::Display) {
    print(MessageKind::Prompt, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn detail(message: impl fmt::Display) {
    print(MessageKind::Detail, message);
}

/// Text progress bar such as `[######------] Step 2 of 3`.
pub fn progress_bar(step: usize, total: usize, width: usize) -> String {
    let total = total.max(1);
    let filled = (step.min(total) * width) / total;
    format!(
        "[{}{}] Step {} of {}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        step,
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_labels() {
        let prefs = OutputPreferences { plain: true };
        assert_eq!(format_message(MessageKind::Warning, "careful", &prefs), "[!] careful");
        assert_eq!(format_message(MessageKind::Section, " Soil ", &prefs), "=== Soil ===");
        assert_eq!(format_message(MessageKind::Detail, "pH 6.5", &prefs), "  pH 6.5");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        insta::assert_snapshot!(progress_bar(1, 3, 12), @"[####--------] Step 1 of 3");
        insta::assert_snapshot!(progress_bar(3, 3, 12), @"[############] Step 3 of 3");
    }
}
