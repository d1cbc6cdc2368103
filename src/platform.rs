//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate primary modifier for the generate shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PRIMARY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PRIMARY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Generate shortcut display
/// - macOS: "Cmd+Enter"
/// - Linux/Windows: "Ctrl+Enter"
#[cfg(target_os = "macos")]
pub const GENERATE_SHORTCUT: &str = "Cmd+Enter";

#[cfg(not(target_os = "macos"))]
pub const GENERATE_SHORTCUT: &str = "Ctrl+Enter";

/// Returns true if the modifiers include the primary modifier.
/// Control is accepted everywhere since many terminals never report Cmd.
pub fn has_primary_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(PRIMARY_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_is_always_primary() {
        assert!(has_primary_modifier(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_no_modifier_is_not_primary() {
        assert!(!has_primary_modifier(KeyModifiers::NONE));
        assert!(!has_primary_modifier(KeyModifiers::SHIFT));
    }
}
