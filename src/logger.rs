//! Logging with colored module prefixes.
//!
//! Everything goes to stderr so stdout carries only rendered markup and can
//! be piped or redirected.
//!
//! ```ignore
//! log!("build"; "injected {} pages", count);
//! log!("warn"; "{}: no <head> element", path.display());
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
    tty::IsTty,
};
use std::{
    io::{Write, stderr},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Total prefix length for a module name: `[`, `]` and the trailing space.
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Output
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width when stderr is
/// a terminal; redirected output is never truncated.
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    let width = stderr
        .is_tty()
        .then(|| get_terminal_width() as usize);

    if width.is_some() {
        execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    }

    writeln!(stderr, "{}", format_line(module, message, width)).ok();
    stderr.flush().ok();
}

/// `[module] message`, with the message cut to fit `width` columns.
fn format_line(module: &str, message: &str, width: Option<usize>) -> String {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    let message = match width {
        Some(width) if !message.contains('\n') => {
            truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
        }
        _ => message,
    };
    format!("{prefix} {message}")
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "build" | "inject" => prefix.bright_green().bold(),
        "context" => prefix.bright_blue().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================
