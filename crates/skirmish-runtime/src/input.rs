//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

pub const MOUSE_LEFT: u32 = 0;
pub const MOUSE_RIGHT: u32 = 1;
pub const MOUSE_MIDDLE: u32 = 2;

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Mouse buttons currently held (0 = left, 1 = right, 2 = middle)
    mouse_buttons_down: HashSet<u32>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<u32>,
    /// Mouse buttons released this frame
    mouse_buttons_just_released: HashSet<u32>,

    /// Current mouse position in window pixels
    pub mouse_position: (f64, f64),
    /// Mouse movement delta this frame
    mouse_delta: (f64, f64),
    /// Wheel lines scrolled this frame
    wheel_delta: f64,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
    /// Mouse button action map: action name -> list of mouse button indices
    mouse_button_map: HashMap<String, Vec<u32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            mouse_buttons_just_released: HashSet::new(),
            mouse_position: (0.0, 0.0),
            mouse_delta: (0.0, 0.0),
            wheel_delta: 0.0,
            action_map: Self::default_action_map(),
            mouse_button_map: Self::default_mouse_button_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("move_forward".into(), vec![KeyCode::KeyW]);
        map.insert("move_backward".into(), vec![KeyCode::KeyS]);
        map.insert("move_left".into(), vec![KeyCode::KeyA]);
        map.insert("move_right".into(), vec![KeyCode::KeyD]);
        map.insert("skill_q".into(), vec![KeyCode::KeyQ]);
        map.insert("skill_e".into(), vec![KeyCode::KeyE]);
        map.insert("skill_r".into(), vec![KeyCode::KeyR]);
        map.insert("interact".into(), vec![KeyCode::KeyF]);
        map.insert("rune_option_1".into(), vec![KeyCode::Digit1]);
        map.insert("rune_option_2".into(), vec![KeyCode::Digit2]);
        map.insert("rune_option_3".into(), vec![KeyCode::Digit3]);
        map.insert("next_skill_slot".into(), vec![KeyCode::Tab]);
        map
    }

    fn default_mouse_button_map() -> HashMap<String, Vec<u32>> {
        let mut map = HashMap::new();
        map.insert("skill_right_click".into(), vec![MOUSE_RIGHT]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action to one or more mouse buttons
    pub fn bind_mouse_action(&mut self, action: impl Into<String>, buttons: Vec<u32>) {
        self.mouse_button_map.insert(action.into(), buttons);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        if self.mouse_buttons_down.remove(&button) {
            self.mouse_buttons_just_released.insert(button);
        }
    }

    /// Process mouse movement (cursor position mode)
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_delta.0 += x - self.mouse_position.0;
        self.mouse_delta.1 += y - self.mouse_position.1;
        self.mouse_position = (x, y);
    }

    /// Process wheel scrolling in lines
    pub fn process_mouse_wheel(&mut self, lines: f64) {
        self.wheel_delta += lines;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.mouse_buttons_just_released.clear();
        self.mouse_delta = (0.0, 0.0);
        self.wheel_delta = 0.0;
    }

    // --- Query methods ---

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_down.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_just_pressed.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Get all actions that were just pressed this frame
    pub fn actions_just_pressed(&self) -> Vec<String> {
        let mut result: Vec<String> = self
            .action_map
            .iter()
            .filter(|(_, keys)| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .map(|(action, _)| action.clone())
            .collect();
        for (action, btns) in &self.mouse_button_map {
            if btns.iter().any(|b| self.mouse_buttons_just_pressed.contains(b))
                && !result.contains(action)
            {
                result.push(action.clone());
            }
        }
        result.sort();
        result
    }

    pub fn mouse_delta(&self) -> (f64, f64) {
        self.mouse_delta
    }

    pub fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }

    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn is_mouse_button_just_pressed(&self, button: u32) -> bool {
        self.mouse_buttons_just_pressed.contains(&button)
    }

    pub fn is_mouse_button_just_released(&self, button: u32) -> bool {
        self.mouse_buttons_just_released.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyQ);
        assert!(input.is_key_down(KeyCode::KeyQ));
        assert!(input.is_key_just_pressed(KeyCode::KeyQ));

        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyQ));
        assert!(!input.is_key_just_pressed(KeyCode::KeyQ));

        input.process_key_up(KeyCode::KeyQ);
        assert!(!input.is_key_down(KeyCode::KeyQ));
        assert!(input.is_key_just_released(KeyCode::KeyQ));
    }

    #[test]
    fn skill_actions_bound_by_default() {
        let mut input = InputState::new();
        assert!(!input.is_action_pressed("skill_e"));

        input.process_key_down(KeyCode::KeyE);
        assert!(input.is_action_pressed("skill_e"));
        assert!(input.is_action_just_pressed("skill_e"));

        input.process_mouse_button_down(MOUSE_RIGHT);
        assert!(input.is_action_pressed("skill_right_click"));
        assert_eq!(
            input.actions_just_pressed(),
            vec!["skill_e".to_string(), "skill_right_click".to_string()]
        );
    }

    #[test]
    fn test_custom_binding() {
        let mut input = InputState::new();
        input.bind_action("interact", vec![KeyCode::KeyG, KeyCode::Enter]);

        input.process_key_down(KeyCode::KeyG);
        assert!(input.is_action_pressed("interact"));

        input.process_key_up(KeyCode::KeyG);
        input.process_key_down(KeyCode::Enter);
        assert!(input.is_action_pressed("interact"));
        assert!(!input.is_key_down(KeyCode::KeyF));
    }

    #[test]
    fn test_mouse_delta_and_wheel() {
        let mut input = InputState::new();

        input.process_mouse_move(100.0, 200.0);
        input.process_mouse_move(110.0, 205.0);
        input.process_mouse_wheel(2.0);

        let delta = input.mouse_delta();
        assert!((delta.0 - 110.0).abs() < 1e-10);
        assert!((delta.1 - 205.0).abs() < 1e-10);
        assert!((input.wheel_delta() - 2.0).abs() < 1e-10);

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.wheel_delta(), 0.0);
    }

    #[test]
    fn mouse_button_edges() {
        let mut input = InputState::new();

        input.process_mouse_button_down(MOUSE_LEFT);
        assert!(input.is_mouse_button_down(MOUSE_LEFT));
        assert!(input.is_mouse_button_just_pressed(MOUSE_LEFT));

        input.end_frame();
        input.process_mouse_button_up(MOUSE_LEFT);
        assert!(!input.is_mouse_button_down(MOUSE_LEFT));
        assert!(input.is_mouse_button_just_released(MOUSE_LEFT));
    }
}
