//! Maps recorded input to camera and model mutations.
//!
//! | Input                | Effect                                   |
//! |----------------------|------------------------------------------|
//! | Left click           | Capture the mouse (enables free camera)  |
//! | Escape               | Release the mouse                        |
//! | W / A / S / D        | Move the camera, only while captured     |
//! | Right drag           | Turn the camera                          |
//! | Middle drag          | Rotate the model                         |
//! | Mouse wheel          | Zoom                                     |
//! | Enter                | Reset the model transform                |
//! | R                    | Reset the camera                         |

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::camera::{Camera, MoveDirection};
use crate::config::ObjectConfig;
use crate::input::Input;
use crate::object::Object;

const MOVE_KEYS: [(KeyCode, MoveDirection); 4] = [
    (KeyCode::KeyW, MoveDirection::Forward),
    (KeyCode::KeyS, MoveDirection::Backward),
    (KeyCode::KeyA, MoveDirection::Left),
    (KeyCode::KeyD, MoveDirection::Right),
];

/// Stateful input mapping. The only state is whether the mouse is captured.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    mouse_captured: bool,
    ui_wants_mouse: bool,
    object: ObjectConfig,
}

impl Controls {
    pub fn new(object: ObjectConfig) -> Self {
        Self {
            object,
            ..Default::default()
        }
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    /// Tell the controls the pointer is over a UI panel. While set, clicks
    /// do not capture the mouse and the wheel does not zoom.
    pub fn set_ui_wants_mouse(&mut self, wants: bool) {
        self.ui_wants_mouse = wants;
    }

    /// Apply one frame of input.
    ///
    /// Returns `Some(captured)` when mouse capture changed, so the host can
    /// grab or release the cursor.
    pub fn apply(&mut self, input: &Input, camera: &mut Camera, object: &mut Object) -> Option<bool> {
        let was_captured = self.mouse_captured;

        if self.mouse_captured && input.key_pressed(KeyCode::Escape) {
            self.mouse_captured = false;
        } else if !self.mouse_captured
            && !self.ui_wants_mouse
            && input.mouse_pressed(MouseButton::Left)
        {
            self.mouse_captured = true;
        }
        camera.set_free_camera_enabled(self.mouse_captured);

        if input.key_pressed(KeyCode::Enter) {
            object.reset_model();
        }
        if input.key_pressed(KeyCode::KeyR) {
            camera.reset();
        }

        for (key, direction) in MOVE_KEYS {
            if input.key_down(key) {
                camera.move_in(direction);
            }
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 && (self.mouse_captured || !self.ui_wants_mouse) {
            camera.apply_zoom(scroll);
        }

        let drag = input.drag_delta();
        if input.mouse_down(MouseButton::Middle) {
            object.drag_rotate(drag.x, drag.y, &self.object);
        } else if input.mouse_down(MouseButton::Right) {
            camera.apply_rotation(drag.x, drag.y);
        }

        (was_captured != self.mouse_captured).then_some(self.mouse_captured)
    }
}
