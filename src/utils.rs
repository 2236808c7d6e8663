use directories::{ProjectDirs, BaseDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "journal-dev",
            Profile::Prod => "journal",
        }
    }
}

/// Get the configuration directory for the given profile
/// Dev profile uses "journal-dev" so it never touches real data
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "journal", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory (storage file, logs) for the given profile
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "journal", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// True when a field has no visible characters
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Check that a chrono format string renders without errors
pub fn is_valid_time_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
/// This follows the standard cross-platform TUI pattern where Ctrl and Option/Alt are treated as equivalent
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
/// On macOS, "Ctrl+" is replaced with "Opt+" for better UX (Option key)
/// On other platforms, the string is returned as-is
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
/// Supports: single keys ("q", "n", "j", "k"), special keys ("Enter", "Left", "Right"), 
/// and modifiers ("Ctrl+b")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();
    
    // Handle modifier keys (Ctrl+)
    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }
    
    // Handle regular keys (no modifiers)
    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    // Handle special keys
    match key_str {
        "Enter" => Ok(crossterm::event::KeyCode::Enter),
        "Esc" | "Escape" => Ok(crossterm::event::KeyCode::Esc),
        "Backspace" => Ok(crossterm::event::KeyCode::Backspace),
        "Tab" => Ok(crossterm::event::KeyCode::Tab),
        "BackTab" | "Shift+Tab" => Ok(crossterm::event::KeyCode::BackTab),
        "Space" | " " => Ok(crossterm::event::KeyCode::Char(' ')),
        "Left" => Ok(crossterm::event::KeyCode::Left),
        "Right" => Ok(crossterm::event::KeyCode::Right),
        "Up" => Ok(crossterm::event::KeyCode::Up),
        "Down" => Ok(crossterm::event::KeyCode::Down),
        "Home" => Ok(crossterm::event::KeyCode::Home),
        "End" => Ok(crossterm::event::KeyCode::End),
        "PageUp" => Ok(crossterm::event::KeyCode::PageUp),
        "PageDown" => Ok(crossterm::event::KeyCode::PageDown),
        "Delete" => Ok(crossterm::event::KeyCode::Delete),
        "Insert" => Ok(crossterm::event::KeyCode::Insert),
        f if f.len() > 1 && f.starts_with('F') => f[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(crossterm::event::KeyCode::F)
            .ok_or_else(|| format!("Unknown key binding: {}", key_str)),
        _ => {
            // Try to parse as a single character
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(crossterm::event::KeyCode::Char(c)),
                _ => Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    }
}


/// Check whether a key event triggers a parsed binding
pub fn matches_key_event(key_event: crossterm::event::KeyEvent, binding: &ParsedKeyBinding) -> bool {
    if binding.requires_ctrl != has_primary_modifier(key_event.modifiers) {
        return false;
    }
    binding.key_code == key_event.code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn parses_plain_special_and_ctrl_bindings() {
        let q = parse_key_binding("q").unwrap();
        assert_eq!(q.key_code, KeyCode::Char('q'));
        assert!(!q.requires_ctrl);

        let tab = parse_key_binding("Tab").unwrap();
        assert_eq!(tab.key_code, KeyCode::Tab);

        let save = parse_key_binding("Ctrl+s").unwrap();
        assert_eq!(save.key_code, KeyCode::Char('s'));
        assert!(save.requires_ctrl);

        let space = parse_key_binding("Space").unwrap();
        assert_eq!(space.key_code, KeyCode::Char(' '));
    }

    #[test]
    fn parses_function_keys() {
        assert_eq!(parse_key_binding("F1").unwrap().key_code, KeyCode::F(1));
        assert_eq!(parse_key_binding("F12").unwrap().key_code, KeyCode::F(12));
        assert!(parse_key_binding("F13").is_err());
    }

    #[test]
    fn rejects_unknown_binding() {
        assert!(parse_key_binding("Hyper+x").is_err());
        assert!(parse_key_binding("qq").is_err());
    }

    #[test]
    fn key_event_matching_respects_modifier() {
        let binding = parse_key_binding("d").unwrap();
        assert!(matches_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE), &binding));
        assert!(!matches_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &binding));
    }

    #[test]
    fn expands_home_prefix_only() {
        assert_eq!(expand_path("/tmp/x.db"), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn validates_time_formats() {
        assert!(is_valid_time_format("%Y-%m-%d"));
        assert!(!is_valid_time_format("%Q"));
        assert!(!is_valid_time_format(""));
    }
}
