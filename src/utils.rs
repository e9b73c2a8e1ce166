//! Supporting helpers: colored message prefixes for stderr diagnostics.

use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "✖ error:".red().bold().to_string()
    } else {
        "✖ error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_enabled() {
        "▲ warning:".yellow().bold().to_string()
    } else {
        "▲ warning:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "◆ note:".blue().bold().to_string()
    } else {
        "◆ note:".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_carry_their_labels() {
        assert!(error_prefix().contains("error:"));
        assert!(warn_prefix().contains("warning:"));
        assert!(note_prefix().contains("note:"));
    }
}
