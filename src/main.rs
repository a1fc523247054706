//! Interactive demo: opens a window and drives a [`Viewer`] from live input.
//!
//! Rendering is left to a real backend; the window title shows the viewer
//! state instead. Pass an STL path to frame that model.
//!
//! Extra keys on top of the viewer controls: `P` adds a point light,
//! `Backspace` removes one, `Tab` cycles the shading style, `N` toggles
//! natural rotation and `L` toggles point-light cubes.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

use lumen::{
    Input, KeyCode, Model, ModelBounds, RotationMode, Vec3, Viewer, ViewerConfig,
};

struct App {
    window: Option<Arc<Window>>,
    viewer: Viewer,
    input: Input,
    last_frame: Instant,
}

impl App {
    fn new(viewer: Viewer) -> Self {
        Self {
            window: None,
            viewer,
            input: Input::new(),
            last_frame: Instant::now(),
        }
    }

    fn apply_demo_keys(&mut self) {
        let input = &self.input;
        if input.key_pressed(KeyCode::KeyP) {
            self.viewer.add_point_light();
        }
        if input.key_pressed(KeyCode::Backspace) {
            self.viewer.remove_point_light();
        }
        if input.key_pressed(KeyCode::Tab) {
            let style = self.viewer.cycle_shading_style();
            log::info!("Shading style: {style}");
        }
        if input.key_pressed(KeyCode::KeyN) {
            let mode = match self.viewer.object().rotation_mode() {
                RotationMode::Input => RotationMode::Natural,
                RotationMode::Natural => RotationMode::Input,
            };
            self.viewer.set_rotation_mode(mode);
        }
        if input.key_pressed(KeyCode::KeyL) {
            let lighting = self.viewer.lighting_mut();
            lighting.set_show_point_lights(!lighting.show_point_lights());
        }
    }

    fn set_cursor_captured(window: &Window, captured: bool) {
        let result = if captured {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(err) = result {
            log::warn!("Cursor grab failed: {err}");
        }
        window.set_cursor_visible(!captured);
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.apply_demo_keys();
        if let Some(captured) = self.viewer.handle_input(&self.input) {
            if let Some(window) = &self.window {
                Self::set_cursor_captured(window, captured);
            }
        }
        self.viewer.begin_frame(dt);
        self.input.begin_frame();

        if let Some(window) = &self.window {
            let camera = self.viewer.camera();
            let p = camera.position();
            window.set_title(&format!(
                "lumen | {} | fov {:.0} | pos ({:.1}, {:.1}, {:.1}) | {} lights",
                self.viewer.shading_style(),
                camera.fov(),
                p.x,
                p.y,
                p.z,
                self.viewer.lighting().point_light_count(),
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(Window::default_attributes().with_title("lumen")) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            event => self.input.handle_event(&event),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        self.input.handle_device_event(&event);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = ViewerConfig::default();
    let viewer = match std::env::args().nth(1) {
        Some(path) => Viewer::for_model(&Model::from_file(&path)?, config)?,
        None => Viewer::new(ModelBounds::from_sphere(Vec3::ZERO, 1.0), config)?,
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(viewer);
    event_loop.run_app(&mut app)?;
    Ok(())
}
