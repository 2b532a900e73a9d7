use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Title and size of the hosted window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Hosts one window and its `Gpu`, and redraws it continuously.
///
/// A canvas is bound to the wgpu device it was created on; with one window
/// there is exactly one device for the whole run.
pub struct Runtime;

impl Runtime {
    /// Runs until the window closes or the app returns [`AppControl::Exit`].
    ///
    /// Window or GPU setup failures end the loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            surface: None,
            failure: None,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window together with the `Gpu` whose surface borrows it.
#[self_referencing]
struct HostedSurface {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl HostedSurface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        HostedSurfaceTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.with_clock_mut(|clock| clock.reset());
        self.request_redraw();
    }

    fn draw<A: App>(&mut self, app: &mut A) -> AppControl {
        self.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: fields.clock.tick(),
            };
            app.on_frame(&mut ctx)
        })
    }
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    surface: Option<HostedSurface>,
    failure: Option<anyhow::Error>,
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match HostedSurface::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(surface) => {
                log::info!("window ready: {}", self.config.title);
                surface.request_redraw();
                self.surface = Some(surface);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Immediate mode: every turn of the loop is a new frame.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.surface = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => surface.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = surface.with_window(|w| w.inner_size());
                surface.resize(size);
            }
            WindowEvent::RedrawRequested => {
                if surface.draw(&mut self.app) == AppControl::Exit {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
