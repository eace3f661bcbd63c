use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Keys the games bind. Anything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Other,
}

/// Errors from parsing textual key names.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" => Ok(Key::W),
            "a" => Ok(Key::A),
            "s" => Ok(Key::S),
            "d" => Ok(Key::D),
            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "space" => Ok(Key::Space),
            other => Err(InputError::UnknownKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A raw input event as delivered by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Host asked to open a context menu (right click).
    ContextMenu,
}

/// Which game the bindings are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Hover tank: WASD/arrows drive, Space shoots. Mouse is unbound.
    #[default]
    Driving,
    /// Melee arena: WASD/arrows move, left mouse attacks, right mouse blocks.
    Melee,
}

/// What the binding did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event changed (or re-asserted) a flag.
    Consumed,
    /// Not bound in this scheme.
    Ignored,
    /// The host default action must be cancelled.
    Suppressed,
}

/// Level-triggered control state read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub attack: bool,
    pub block: bool,
}

impl ControlFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the flags under the given scheme.
    pub fn handle(&mut self, scheme: ControlScheme, event: InputEvent) -> Handled {
        match event {
            InputEvent::KeyDown(key) => self.set_key(scheme, key, true),
            InputEvent::KeyUp(key) => self.set_key(scheme, key, false),
            InputEvent::MouseDown(button) => self.set_button(scheme, button, true),
            InputEvent::MouseUp(button) => self.set_button(scheme, button, false),
            InputEvent::ContextMenu => match scheme {
                ControlScheme::Melee => Handled::Suppressed,
                ControlScheme::Driving => Handled::Ignored,
            },
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True if no flag is held.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    fn set_key(&mut self, scheme: ControlScheme, key: Key, down: bool) -> Handled {
        let slot = match key {
            Key::W | Key::Up => &mut self.forward,
            Key::S | Key::Down => &mut self.backward,
            Key::A | Key::Left => &mut self.left,
            Key::D | Key::Right => &mut self.right,
            Key::Space if scheme == ControlScheme::Driving => &mut self.shoot,
            _ => return Handled::Ignored,
        };
        *slot = down;
        tracing::trace!(?key, down, "key binding");
        Handled::Consumed
    }

    fn set_button(&mut self, scheme: ControlScheme, button: MouseButton, down: bool) -> Handled {
        if scheme != ControlScheme::Melee {
            return Handled::Ignored;
        }
        match button {
            MouseButton::Left => self.attack = down,
            MouseButton::Right => self.block = down,
            MouseButton::Middle => return Handled::Ignored,
        }
        tracing::trace!(?button, down, "mouse binding");
        Handled::Consumed
    }
}

/// Tracks the previous level of a flag to report rising edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    previous: bool,
}

impl Edge {
    /// Feed the current level; returns true only on a false -> true change.
    pub fn rising(&mut self, level: bool) -> bool {
        let fired = level && !self.previous;
        self.previous = level;
        fired
    }

    pub fn reset(&mut self) {
        self.previous = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_share_flags() {
        let mut flags = ControlFlags::new();
        flags.handle(ControlScheme::Driving, InputEvent::KeyDown(Key::W));
        assert!(flags.forward);
        flags.handle(ControlScheme::Driving, InputEvent::KeyUp(Key::Up));
        assert!(!flags.forward);

        flags.handle(ControlScheme::Driving, InputEvent::KeyDown(Key::Down));
        flags.handle(ControlScheme::Driving, InputEvent::KeyDown(Key::Left));
        flags.handle(ControlScheme::Driving, InputEvent::KeyDown(Key::D));
        assert!(flags.backward && flags.left && flags.right);
    }

    #[test]
    fn space_shoots_only_when_driving() {
        let mut flags = ControlFlags::new();
        let h = flags.handle(ControlScheme::Driving, InputEvent::KeyDown(Key::Space));
        assert_eq!(h, Handled::Consumed);
        assert!(flags.shoot);

        let mut flags = ControlFlags::new();
        let h = flags.handle(ControlScheme::Melee, InputEvent::KeyDown(Key::Space));
        assert_eq!(h, Handled::Ignored);
        assert!(!flags.shoot);
    }

    #[test]
    fn mouse_buttons_map_to_attack_and_block() {
        let mut flags = ControlFlags::new();
        flags.handle(ControlScheme::Melee, InputEvent::MouseDown(MouseButton::Left));
        flags.handle(ControlScheme::Melee, InputEvent::MouseDown(MouseButton::Right));
        assert!(flags.attack && flags.block);
        flags.handle(ControlScheme::Melee, InputEvent::MouseUp(MouseButton::Right));
        assert!(flags.attack && !flags.block);
    }

    #[test]
    fn mouse_is_unbound_when_driving() {
        let mut flags = ControlFlags::new();
        let h = flags.handle(ControlScheme::Driving, InputEvent::MouseDown(MouseButton::Left));
        assert_eq!(h, Handled::Ignored);
        assert!(flags.is_idle());
    }

    #[test]
    fn context_menu_suppressed_in_melee() {
        let mut flags = ControlFlags::new();
        assert_eq!(
            flags.handle(ControlScheme::Melee, InputEvent::ContextMenu),
            Handled::Suppressed
        );
        assert_eq!(
            flags.handle(ControlScheme::Driving, InputEvent::ContextMenu),
            Handled::Ignored
        );
    }

    #[test]
    fn key_names_parse() {
        assert_eq!("W".parse::<Key>().unwrap(), Key::W);
        assert_eq!("arrowup".parse::<Key>().unwrap(), Key::Up);
        assert_eq!(" space ".parse::<Key>().unwrap(), Key::Space);
        assert!(matches!("q".parse::<Key>(), Err(InputError::UnknownKey(_))));
    }

    #[test]
    fn edge_fires_once_per_press() {
        let mut edge = Edge::default();
        assert!(edge.rising(true));
        assert!(!edge.rising(true));
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn clear_releases_everything() {
        let mut flags = ControlFlags {
            forward: true,
            block: true,
            ..ControlFlags::default()
        };
        flags.clear();
        assert!(flags.is_idle());
    }
}
