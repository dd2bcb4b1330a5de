//! Console message prefixes, colorized unless `NO_COLOR` is set.

use owo_colors::OwoColorize;

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn info_prefix() -> String {
    if use_colors() {
        "🔍".blue().to_string()
    } else {
        "🔍".to_string()
    }
}

pub fn warn_prefix() -> String {
    if use_colors() {
        "⚠️".yellow().bold().to_string()
    } else {
        "⚠️".to_string()
    }
}

pub fn error_prefix() -> String {
    if use_colors() {
        "❌".red().bold().to_string()
    } else {
        "❌".to_string()
    }
}

pub fn success_prefix() -> String {
    if use_colors() {
        "✅".green().to_string()
    } else {
        "✅".to_string()
    }
}
