//! Translates winit input into wayfinder [`Msg`] values.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key as WKey, NamedKey};

use wayfinder_core::{Key, MouseAction, Msg};

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

pub(crate) fn translate_key(logical_key: &WKey, state: ElementState) -> Option<Msg> {
    if state != ElementState::Pressed {
        return None;
    }

    let key = match logical_key {
        WKey::Named(NamedKey::Escape) => Key::Escape,
        WKey::Named(NamedKey::Enter) => Key::Enter,
        WKey::Named(NamedKey::Space) => Key::Space,
        WKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Key::Space,
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(Msg::key(key))
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// The action a held button performs, or `None` for buttons wayfinder does
/// not use.
pub(crate) fn mouse_action(button: MouseButton) -> Option<MouseAction> {
    match button {
        MouseButton::Left => Some(MouseAction::Main),
        MouseButton::Right => Some(MouseAction::Secondary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys() {
        let press = ElementState::Pressed;
        assert_eq!(
            translate_key(&WKey::Named(NamedKey::Space), press),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            translate_key(&WKey::Named(NamedKey::Escape), press),
            Some(Msg::key(Key::Escape))
        );
        assert_eq!(translate_key(&WKey::Named(NamedKey::Tab), press), None);
    }

    #[test]
    fn character_keys() {
        let press = ElementState::Pressed;
        assert_eq!(
            translate_key(&WKey::Character("g".into()), press),
            Some(Msg::key(Key::Char('g')))
        );
        assert_eq!(
            translate_key(&WKey::Character(" ".into()), press),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(translate_key(&WKey::Character("ab".into()), press), None);
    }

    #[test]
    fn releases_are_ignored() {
        assert_eq!(
            translate_key(&WKey::Character("q".into()), ElementState::Released),
            None
        );
    }

    #[test]
    fn buttons() {
        assert_eq!(mouse_action(MouseButton::Left), Some(MouseAction::Main));
        assert_eq!(mouse_action(MouseButton::Right), Some(MouseAction::Secondary));
        assert_eq!(mouse_action(MouseButton::Middle), None);
    }
}
