//! Keystroke to grid key mapping

use super::types::{KeyCode, Keystroke};
use crate::grid::{GridKey, NavMove};

/// Map a keystroke to the grid key it triggers, if any
///
/// Characters typed without Ctrl/Alt/Meta are printable; Shift only changes
/// the character. Ctrl+Home/End jump to the first and last cell.
pub fn grid_key(stroke: Keystroke) -> Option<GridKey> {
    let mods = stroke.mods;
    let key = match stroke.key {
        KeyCode::Up => GridKey::Navigate(NavMove::Up),
        KeyCode::Down => GridKey::Navigate(NavMove::Down),
        KeyCode::Left => GridKey::Navigate(NavMove::Left),
        KeyCode::Right => GridKey::Navigate(NavMove::Right),
        KeyCode::Home if mods.ctrl() || mods.meta() => GridKey::Navigate(NavMove::FirstCell),
        KeyCode::End if mods.ctrl() || mods.meta() => GridKey::Navigate(NavMove::LastCell),
        KeyCode::Home => GridKey::Navigate(NavMove::RowStart),
        KeyCode::End => GridKey::Navigate(NavMove::RowEnd),
        KeyCode::PageUp => GridKey::Navigate(NavMove::PageUp),
        KeyCode::PageDown => GridKey::Navigate(NavMove::PageDown),
        KeyCode::Tab if mods.shift() => GridKey::ShiftTab,
        KeyCode::Tab => GridKey::Tab,
        KeyCode::Enter => GridKey::Enter,
        KeyCode::Escape => GridKey::Escape,
        KeyCode::F(2) => GridKey::F2,
        KeyCode::Delete => GridKey::Delete,
        KeyCode::Backspace => GridKey::Backspace,
        KeyCode::F(_) => return None,
        _ if mods.has_command_modifier() => return None,
        KeyCode::Space => GridKey::Char(' '),
        KeyCode::Char(c) if mods.shift() => GridKey::Char(c.to_uppercase().next().unwrap_or(c)),
        KeyCode::Char(c) => GridKey::Char(c),
    };
    Some(key)
}
