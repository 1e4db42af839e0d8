use chrono::{NaiveDateTime, NaiveTime, Timelike};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    pub fn app_name(&self) -> &'static str {
        match self {
            Profile::Dev => "meditrak-dev",
            Profile::Prod => "meditrak",
        }
    }
}

/// Get the configuration directory path for the given profile
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "meditrak", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for the given profile
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "meditrak", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Parse a 24-hour time of day and return it normalized as zero-padded `HH:MM`.
/// Accepts `H:MM` as well, since that is what people type.
pub fn parse_time_of_day(time_str: &str) -> Result<String, String> {
    let trimmed = time_str.trim();
    if trimmed.is_empty() {
        return Err("Time is required".to_string());
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| format!("Time must be in HH:MM (24-hour) format, got '{}'", trimmed))?;
    Ok(format_hhmm(time.hour(), time.minute()))
}

pub fn format_hhmm(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Minutes since midnight for a normalized `HH:MM` string
pub fn minutes_of_day(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h < 24 && m < 60 {
        Some(h * 60 + m)
    } else {
        None
    }
}

/// Shift a time of day forward, wrapping across midnight
pub fn add_minutes_wrapping(hhmm: &str, minutes: u32) -> Option<String> {
    let total = (minutes_of_day(hhmm)? + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
    Some(format_hhmm(total / 60, total % 60))
}

/// Wall-clock time of day of a local timestamp as `HH:MM`
pub fn hhmm_of(now: NaiveDateTime) -> String {
    format_hhmm(now.hour(), now.minute())
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate modifier
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports single keys ("q", "n"), special keys ("Enter", "F1") and "Ctrl+" modifiers
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    use crossterm::event::KeyCode;

    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "Delete" => Ok(KeyCode::Delete),
        _ => {
            if let Some(n) = key_str.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_parse_time_of_day_normalizes() {
        assert_eq!(parse_time_of_day("8:05").unwrap(), "08:05");
        assert_eq!(parse_time_of_day(" 23:59 ").unwrap(), "23:59");
        assert!(parse_time_of_day("").is_err());
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("7pm").is_err());
    }

    #[test]
    fn test_minutes_of_day() {
        assert_eq!(minutes_of_day("00:00"), Some(0));
        assert_eq!(minutes_of_day("23:55"), Some(1435));
        assert_eq!(minutes_of_day("25:00"), None);
        assert_eq!(minutes_of_day("garbage"), None);
    }

    #[test]
    fn test_add_minutes_wraps_midnight() {
        assert_eq!(add_minutes_wrapping("23:55", 10).as_deref(), Some("00:05"));
        assert_eq!(add_minutes_wrapping("08:00", 10).as_deref(), Some("08:10"));
        assert_eq!(add_minutes_wrapping("12:00", MINUTES_PER_DAY).as_deref(), Some("12:00"));
    }

    #[test]
    fn test_parse_key_binding() {
        let b = parse_key_binding("Ctrl+s").unwrap();
        assert!(b.requires_ctrl);
        assert_eq!(b.key_code, KeyCode::Char('s'));
        assert_eq!(parse_key_binding("F1").unwrap().key_code, KeyCode::F(1));
        assert_eq!(parse_key_binding("C").unwrap().key_code, KeyCode::Char('C'));
        assert!(parse_key_binding("Hyper").is_err());
    }
}
