//! Windowed host.
//!
//! Owns the winit event loop, the GPU renderer, and the field itself:
//! pointer events are forwarded to the field, and every redraw steps the
//! simulation once and draws the resulting snapshot. The field's coordinate
//! space tracks the surface in physical pixels, so a window resize
//! repopulates the field at the new dimensions.

use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::RunError;
use crate::field::NodeField;
use crate::params::FieldParams;
use crate::render::Renderer;
use crate::time::FrameClock;
use crate::visuals::VisualConfig;

struct FieldApp {
    field: NodeField,
    visuals: VisualConfig,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    /// Fatal setup or render error, reported after the loop exits.
    error: Option<RunError>,
}

impl FieldApp {
    fn new(params: FieldParams, visuals: VisualConfig) -> Self {
        Self {
            field: NodeField::new(params),
            visuals,
            clock: FrameClock::new(),
            window: None,
            renderer: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for FieldApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let params = self.field.params();
        let attrs = Window::default_attributes()
            .with_title("nodemesh")
            .with_inner_size(winit::dpi::LogicalSize::new(params.width, params.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(Renderer::new(window.clone(), self.visuals)) {
            Ok(renderer) => {
                // The surface may not match the logical size on hidpi
                // displays; the field tracks physical pixels.
                let size = window.inner_size();
                if size.width > 0 && size.height > 0 {
                    self.field.resize(size.width as f32, size.height as f32);
                }
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                if size.width > 0 && size.height > 0 {
                    self.field.resize(size.width as f32, size.height as f32);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.field
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                if self.field.pointer().grabbed.is_none() {
                    self.field.set_hovered(None);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            let position = self.field.pointer().position;
                            self.field.press(position);
                        }
                        ElementState::Released => {
                            self.field.release();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.clock.tick();
                self.field.step();

                if let Some(renderer) = &mut self.renderer {
                    let snapshot = self.field.snapshot();
                    let pointer = self.field.pointer().position;
                    let glow_radius = self.field.params().glow_radius;
                    match renderer.render(&snapshot, pointer, glow_radius) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            if let Some(window) = &self.window {
                                renderer.resize(window.inner_size());
                            }
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("surface error: {e:?}"),
                    }
                }

                if let Some(window) = &self.window {
                    if self.clock.frame() % 30 == 0 {
                        window.set_title(&format!(
                            "nodemesh - {} nodes - {:.0} fps",
                            self.field.population(),
                            self.clock.fps()
                        ));
                    }
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run the field until it is closed.
pub fn run(params: FieldParams, visuals: VisualConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FieldApp::new(params, visuals);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
