//! Per-frame keyboard and mouse state built from winit events.
//!
//! [`Input`] only records what happened; [`Controls`](crate::Controls)
//! decides what it means for the camera and model. Hosts that do not use
//! winit can drive it through the `press_*`/`release_*` methods directly.

use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels per wheel "line" for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 120.0;

/// Held, newly pressed and newly released members of a button set.
#[derive(Debug)]
struct Buttons<T> {
    down: HashSet<T>,
    pressed: HashSet<T>,
    released: HashSet<T>,
}

impl<T> Default for Buttons<T> {
    fn default() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> Buttons<T> {
    fn press(&mut self, button: T) {
        // Key repeat re-sends presses for held keys
        if self.down.insert(button) {
            self.pressed.insert(button);
        }
    }

    fn release(&mut self, button: T) {
        if self.down.remove(&button) {
            self.released.insert(button);
        }
    }

    fn clear_edges(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

#[derive(Debug, Default)]
pub struct Input {
    keys: Buttons<KeyCode>,
    mouse: Buttons<MouseButton>,
    /// `None` until the first cursor event, so the first move has no delta.
    cursor_position: Option<Vec2>,
    cursor_delta: Vec2,
    /// Unaccelerated device motion; keeps flowing while the cursor is grabbed.
    motion_delta: Vec2,
    scroll_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame edges and deltas. Call before feeding this frame's events.
    pub fn begin_frame(&mut self) {
        self.keys.clear_edges();
        self.mouse.clear_edges();
        self.cursor_delta = Vec2::ZERO;
        self.motion_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_mouse(*button),
                ElementState::Released => self.release_mouse(*button),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
                self.scroll(lines);
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.add_motion(Vec2::new(*dx as f32, *dy as f32));
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse.press(button);
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse.release(button);
    }

    /// Record a new absolute cursor position in window coordinates.
    pub fn move_cursor(&mut self, position: Vec2) {
        if let Some(previous) = self.cursor_position {
            self.cursor_delta += position - previous;
        }
        self.cursor_position = Some(position);
    }

    /// Record raw relative mouse motion.
    pub fn add_motion(&mut self, delta: Vec2) {
        self.motion_delta += delta;
    }

    /// Record wheel movement in lines.
    pub fn scroll(&mut self, lines: Vec2) {
        self.scroll_delta += lines;
    }

    /// Drop all held keys and buttons, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        let keys: Vec<KeyCode> = self.keys.down.iter().copied().collect();
        for key in keys {
            self.keys.release(key);
        }
        let buttons: Vec<MouseButton> = self.mouse.down.iter().copied().collect();
        for button in buttons {
            self.mouse.release(button);
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys.down.contains(&key)
    }

    /// True only on the frame the key went down.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys.pressed.contains(&key)
    }

    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys.released.contains(&key)
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.down.contains(&button)
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.pressed.contains(&button)
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse.released.contains(&button)
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position
    }

    /// Cursor movement this frame in window pixels.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Raw mouse motion this frame.
    pub fn motion_delta(&self) -> Vec2 {
        self.motion_delta
    }

    /// Mouse movement to use for dragging: raw motion when any arrived,
    /// cursor movement otherwise.
    pub fn drag_delta(&self) -> Vec2 {
        if self.motion_delta != Vec2::ZERO {
            self.motion_delta
        } else {
            self.cursor_delta
        }
    }

    /// Scroll wheel movement this frame, in lines.
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edges_last_one_frame() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        assert!(input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));

        input.begin_frame();
        // Repeat event while held
        input.press_key(KeyCode::KeyW);
        assert!(!input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));

        input.release_key(KeyCode::KeyW);
        assert!(input.key_released(KeyCode::KeyW));
        assert!(!input.key_down(KeyCode::KeyW));
    }

    #[test]
    fn first_cursor_event_has_no_delta() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(400.0, 300.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.move_cursor(Vec2::new(410.0, 295.0));
        assert_eq!(input.cursor_delta(), Vec2::new(10.0, -5.0));

        input.begin_frame();
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
        assert_eq!(input.cursor_position(), Some(Vec2::new(410.0, 295.0)));
    }

    #[test]
    fn raw_motion_takes_priority_for_drags() {
        let mut input = Input::new();
        input.move_cursor(Vec2::ZERO);
        input.move_cursor(Vec2::new(3.0, 3.0));
        assert_eq!(input.drag_delta(), Vec2::new(3.0, 3.0));

        input.add_motion(Vec2::new(7.0, -1.0));
        assert_eq!(input.drag_delta(), Vec2::new(7.0, -1.0));
    }

    #[test]
    fn release_all_clears_held_state() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyA);
        input.press_mouse(MouseButton::Right);

        input.release_all();

        assert!(!input.key_down(KeyCode::KeyA));
        assert!(!input.mouse_down(MouseButton::Right));
        assert!(input.mouse_released(MouseButton::Right));
    }
}
