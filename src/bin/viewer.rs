//! Minimal scene viewer: loads a scene document and flies a camera through
//! it. Pass the document path as the first argument.

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vox_ngin::{
    context::Context,
    render::render_frame,
    scene::{
        Scene,
        gpu::{GpuBackend, GpuScene},
    },
};

struct State {
    ctx: Context,
    scene: GpuScene,
    last_frame: Instant,
    mouse_look: bool,
}

struct Viewer {
    scene_path: String,
    runtime: tokio::runtime::Runtime,
    state: Option<State>,
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title("vox-ngin viewer");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let ctx = match self.runtime.block_on(Context::new(window)) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("failed to initialize GPU context: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let mut backend = GpuBackend::new(&ctx.device, &ctx.queue, &ctx.layouts);
        let scene = match Scene::load(&self.scene_path, &mut backend) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("failed to load scene {}: {}", self.scene_path, e);
                event_loop.exit();
                return;
            }
        };

        self.state = Some(State {
            ctx,
            scene,
            last_frame: Instant::now(),
            mouse_look: false,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                state.ctx.camera.controller.process_keyboard(key, key_state);
            }
            WindowEvent::MouseInput {
                button: winit::event::MouseButton::Right,
                state: button_state,
                ..
            } => {
                state.mouse_look = button_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                state.ctx.camera.controller.process_scroll(&delta);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now - state.last_frame;
                state.last_frame = now;
                state.ctx.update_camera(dt);

                match render_frame(&state.ctx, &state.scene) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window().inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("frame dropped: {}", e),
                }
                state.ctx.window().request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.mouse_look {
            if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
                state.ctx.camera.controller.process_mouse(dx, dy);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/scene.xml".to_string());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer {
        scene_path,
        runtime: tokio::runtime::Runtime::new()?,
        state: None,
    };
    event_loop.run_app(&mut viewer)?;
    Ok(())
}
