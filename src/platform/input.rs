//! Keyboard and pointer sampling
//!
//! Browser events update an `InputState`; the frame driver samples it into a
//! `TickInput` once per tick, which also clears the one-shot events.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{Cardinal, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "arrowup" => Some(Key::ArrowUp),
            "arrowdown" => Some(Key::ArrowDown),
            "arrowleft" => Some(Key::ArrowLeft),
            "arrowright" => Some(Key::ArrowRight),
            " " | "space" | "spacebar" => Some(Key::Space),
            "escape" | "esc" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Current input state between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    keys: HashSet<Key>,
    /// Last pointer position in playfield coordinates
    pointer: Vec2,
    clicked: bool,
    pause_pressed: bool,
    /// Idle/demo mode toggle
    pub idle_mode: bool,
    /// Logical playfield size the pointer is mapped into
    width: f32,
    height: f32,
}

impl InputState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            keys: HashSet::new(),
            pointer: Vec2::new(width / 2.0, height / 2.0),
            clicked: false,
            pause_pressed: false,
            idle_mode: false,
            width,
            height,
        }
    }

    /// Record a key press by DOM key name. Escape queues a pause toggle on the
    /// initial press only, so auto-repeat does not flicker the pause menu.
    pub fn key_down(&mut self, name: &str) -> Option<Key> {
        let key = Key::from_name(name)?;
        let fresh = self.keys.insert(key);
        if key == Key::Escape && fresh {
            self.pause_pressed = true;
        }
        Some(key)
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.keys.remove(&key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Release every key (window lost focus)
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Map a pointer position in display pixels to playfield coordinates
    pub fn set_pointer_from_display(&mut self, x: f32, y: f32, display_w: f32, display_h: f32) {
        if display_w <= 0.0 || display_h <= 0.0 {
            return;
        }
        let scaled = Vec2::new(x * (self.width / display_w), y * (self.height / display_h));
        self.pointer = scaled.clamp(Vec2::ZERO, Vec2::new(self.width, self.height));
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn click(&mut self) {
        self.clicked = true;
    }

    pub fn press_pause(&mut self) {
        self.pause_pressed = true;
    }

    /// Highest-priority arrow key currently held
    fn fire_dir(&self) -> Option<Cardinal> {
        [
            (Key::ArrowUp, Cardinal::Up),
            (Key::ArrowDown, Cardinal::Down),
            (Key::ArrowLeft, Cardinal::Left),
            (Key::ArrowRight, Cardinal::Right),
        ]
        .into_iter()
        .find(|(key, _)| self.is_down(*key))
        .map(|(_, dir)| dir)
    }

    /// Build the input for one tick and clear one-shot events
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            up: self.is_down(Key::W),
            down: self.is_down(Key::S),
            left: self.is_down(Key::A),
            right: self.is_down(Key::D),
            fire_dir: self.fire_dir(),
            fire_at_pointer: self.is_down(Key::Space),
            click: self.clicked,
            pointer: self.pointer,
            pause: self.pause_pressed,
            idle_mode: self.idle_mode,
        };
        self.clicked = false;
        self.pause_pressed = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_sample_reads_held_keys() {
        let mut input = InputState::new(320.0, 180.0);
        input.key_down("w");
        input.key_down("D");
        input.key_down("ArrowRight");
        input.key_down("ArrowDown");

        let tick = input.sample();
        assert!(tick.up && tick.right);
        assert!(!tick.down && !tick.left);
        // Down outranks right
        assert_eq!(tick.fire_dir, Some(Cardinal::Down));

        input.key_up("ArrowDown");
        assert_eq!(input.sample().fire_dir, Some(Cardinal::Right));
    }

    #[test]
    fn test_one_shot_events_clear_after_sample() {
        let mut input = InputState::new(320.0, 180.0);
        input.click();
        input.key_down("Escape");
        let first = input.sample();
        assert!(first.click && first.pause);

        // Auto-repeat keydown does not queue another pause
        input.key_down("Escape");
        let second = input.sample();
        assert!(!second.click && !second.pause);

        input.key_up("Escape");
        input.key_down("Escape");
        assert!(input.sample().pause);
    }

    #[test]
    fn test_pointer_scaling_and_clamp() {
        let mut input = InputState::new(320.0, 180.0);
        input.set_pointer_from_display(640.0, 180.0, 1280.0, 720.0);
        assert_eq!(input.pointer(), Vec2::new(160.0, 45.0));

        input.set_pointer_from_display(-50.0, 9999.0, 1280.0, 720.0);
        assert_eq!(input.pointer(), Vec2::new(0.0, 180.0));

        // Zero-size display is ignored
        input.set_pointer_from_display(10.0, 10.0, 0.0, 720.0);
        assert_eq!(input.pointer(), Vec2::new(0.0, 180.0));
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new(320.0, 180.0);
        input.key_down("a");
        input.key_down(" ");
        input.release_all();
        let tick = input.sample();
        assert!(!tick.left && !tick.fire_at_pointer);
    }
}
