//! Path lookup, ANSI stripping, and timestamps shared by the log sinks.
use std::fs;
use std::path::PathBuf;

/// Remove terminal escape sequences from `s`.
///
/// CSI sequences (`ESC [` ... final byte in `@`..`~`) are dropped whole, so
/// colours and cursor movement both disappear. A lone `ESC x` pair is
/// dropped as well.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            chars.by_ref().find(|inner| ('@'..='~').contains(inner));
        }
    }
    out
}

/// Width of the attached terminal: `COLUMNS`, then the tty size, then 80.
pub(super) fn terminal_columns() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    let from_tty = || terminal_size::terminal_size().map(|(w, _)| usize::from(w.0));
    from_env
        .filter(|&n| n > 0)
        .or_else(from_tty)
        .filter(|&n| n > 0)
        .unwrap_or(80)
}

/// The user's home directory from `HOME` (or `USERPROFILE`).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// An XDG base directory: the value of `var` if set and non-empty,
/// otherwise `~/<fallback>`.
#[must_use]
pub fn xdg_dir(var: &str, fallback: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(fallback)))
}

/// `<cache>/shellboot/<command>.log`, creating the directory on the way.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = xdg_dir("XDG_CACHE_HOME", ".cache")?.join("shellboot");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`, used in the run header.
pub(super) fn utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time as `HH:MM:SS.fff`, prefixed to every file line.
pub(super) fn utc_time_ms() -> String {
    chrono::Utc::now().format("%H:%M:%S%.3f").to_string()
}
