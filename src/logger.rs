//! Terminal logging with colored module prefixes.
//!
//! Lines are written whole: per-file lines carry a path and, on failure, the
//! reason, and both must survive however long the path is.
//!
//! # Example
//!
//! ```ignore
//! log!("zip"; "added {} to {}", entry, archive);
//! log!("warn"; "fragment directory {} does not exist", dir.display());
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use std::io::{Write, stdout};

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
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
#[inline]
pub fn log(module: &str, message: &str) {
    let mut stdout = stdout().lock();

    // Leftover characters only exist on an interactive terminal
    if stdout.is_tty() {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    }

    writeln!(stdout, "{}", render(module, message)).ok();
    stdout.flush().ok();
}

/// `[module] message`, with the prefix colored.
fn render(module: &str, message: &str) -> String {
    let module_lower = module.to_ascii_lowercase();
    format!("{} {message}", colorize_prefix(module, &module_lower))
}

/// Symbol shown before a per-file status line.
pub fn status_symbol(ok: bool) -> ColoredString {
    if ok { "✓".green() } else { "✗".red() }
}

/// Dim a message that carries no action (e.g. unchanged files).
pub fn dimmed(message: &str) -> ColoredString {
    message.dimmed()
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "zip" => prefix.bright_blue().bold(),
        "fix" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        let prefix = colorize_prefix("fix", "fix");
        assert!(prefix.to_string().contains("[fix]"));
    }

    #[test]
    fn test_render_keeps_long_failure_line_whole() {
        let path = format!("collection/fragments/{}/index.html", "sp-nested-".repeat(20));
        assert!(path.len() > 120);
        let reason = "failed to read file: stream did not contain valid UTF-8";
        let message = format!("{} {path}: {reason}", status_symbol(false));

        let line = render("error", &message);

        assert!(line.contains("[error]"));
        assert!(line.contains(&path));
        assert!(line.ends_with(reason));
    }

    #[test]
    fn test_render_keeps_dimmed_message_intact() {
        let message = dimmed(&format!("unchanged: {}", "a/".repeat(100))).to_string();
        let line = render("fix", &message);
        assert!(line.ends_with(&message));
    }

    #[test]
    fn test_render_has_no_line_clear() {
        // The clear sequence is terminal-only and written by `log` itself
        let line = render("zip", "added sp-hero/index.html to sp-hero.zip");
        assert!(!line.contains("\x1b[K"));
    }
}
