use anyhow::{Context, Result};

use crate::config::RuntimeConfig;
use crate::coords::{LetterboxView, Vec2};
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit, WgpuBackend};
use crate::input::{
    Action,
    EventProducer,
    EventQueue,
    Key,
    KeyEvent,
    Modifiers,
    MouseButton,
    MouseButtonEvent,
    MouseMovedEvent,
    ScrollEvent,
};
use crate::render::{Canvas, DrawList};
use crate::target::{FrameStatus, RenderBackend, RenderTargetManager};
use crate::time::FrameClock;

use super::backend::{WindowBackend, WindowCallbacks};
use super::state::{PendingResize, ResizeSource, WindowRuntimeState};
use super::winit::WinitWindow;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and runs `app` until close.
    pub fn run<A: App>(config: RuntimeConfig, gpu_init: GpuInit, mut app: A) -> Result<()> {
        config.validate().context("invalid runtime configuration")?;

        let window = WinitWindow::open(&config)?;
        let handle = window.window().context("window missing after startup")?;

        let gpu = pollster::block_on(Gpu::new(handle, gpu_init)).context("GPU initialization failed")?;
        let backend = WgpuBackend::new(gpu);

        FrameLoop::new(config, window, backend)?.run(&mut app)
    }
}

/// Per-frame orchestration of window, event queue, projection and render target.
///
/// Each iteration runs, in order:
/// 1. apply a pending resize (projection, surface, target)
/// 2. poll window events into the queue
/// 3. flush the queue into the app
/// 4. draw the app's frame into the bound target
/// 5. resolve into the surface and present
/// 6. stop if close was requested
///
/// The target is torn down when the loop ends, whether or not it failed.
pub struct FrameLoop<W: WindowBackend, B: RenderBackend> {
    config: RuntimeConfig,
    // Before `window`: GPU resources go first on drop.
    targets: RenderTargetManager<B>,
    window: W,
    view: LetterboxView,
    queue: EventQueue,
    state: WindowRuntimeState,
    clock: FrameClock,
    draw_list: DrawList,
    drawable: bool,
}

impl<W: WindowBackend, B: RenderBackend> FrameLoop<W, B> {
    /// The window's current size becomes the first pending resize, so the
    /// target is created by the first frame.
    pub fn new(config: RuntimeConfig, window: W, backend: B) -> Result<Self> {
        config.validate().context("invalid runtime configuration")?;

        let view = LetterboxView::new(config.virtual_width, config.virtual_height)?;
        let targets = RenderTargetManager::new(backend, &config.msaa)?;

        let mut state = WindowRuntimeState::new();
        let (width, height) = window.framebuffer_size();
        state.request_resize(width, height, ResizeSource::Framebuffer);

        Ok(Self {
            config,
            targets,
            window,
            view,
            queue: EventQueue::new(),
            state,
            clock: FrameClock::new(),
            draw_list: DrawList::new(),
            drawable: false,
        })
    }

    pub fn view(&self) -> &LetterboxView {
        &self.view
    }

    pub fn targets(&self) -> &RenderTargetManager<B> {
        &self.targets
    }

    /// Enqueue handle for input produced outside the window callbacks.
    pub fn producer(&self) -> EventProducer {
        self.queue.producer()
    }

    /// Runs frames until close is requested or a fatal error occurs.
    pub fn run<A: App + ?Sized>(mut self, app: &mut A) -> Result<()> {
        let result = self.run_frames(app);
        if let Err(e) = &result {
            log::error!("frame loop failed: {e:#}");
        }
        self.teardown();
        result
    }

    fn run_frames<A: App + ?Sized>(&mut self, app: &mut A) -> Result<()> {
        loop {
            self.apply_pending_resize()?;
            self.poll()?;
            self.queue.flush(app);

            if self.drawable && self.draw_frame(app)? == AppControl::Exit {
                self.state.request_close();
            }

            if self.state.should_close() {
                log::info!("close requested");
                return Ok(());
            }
        }
    }

    /// Step 1. Clears the pending flag only after the target matches the new size.
    fn apply_pending_resize(&mut self) -> Result<()> {
        let Some(pending) = self.state.pending_resize() else {
            return Ok(());
        };

        if !pending.is_drawable() {
            if self.drawable {
                log::debug!("output is {}x{}; drawing suspended", pending.width, pending.height);
            }
            self.drawable = false;
            return Ok(());
        }

        let (width, height) = (pending.width, pending.height);
        if let Err(e) = self.view.set_buffer_size(width as f32, height as f32) {
            log::warn!("resize to {width}x{height} rejected: {e}");
            self.state.clear_resize();
            return Ok(());
        }

        self.targets.backend_mut().configure_surface(width, height);
        self.targets
            .resize(width, height)
            .with_context(|| format!("failed to recreate render target at {width}x{height}"))?;

        self.state.clear_resize();
        if !self.drawable {
            self.clock.reset();
        }
        self.drawable = true;
        log::debug!("resized to {width}x{height} ({:?})", pending.source);
        Ok(())
    }

    /// Step 2.
    fn poll(&mut self) -> Result<()> {
        self.state.begin_poll();

        // Nothing to draw: block briefly instead of spinning.
        let wait = (!self.drawable).then_some(self.config.idle_wait);

        let mut callbacks = LoopCallbacks {
            queue: &self.queue,
            view: &self.view,
            state: &mut self.state,
            close_on_escape: self.config.close_on_escape,
        };
        self.window.poll_events(wait, &mut callbacks)
    }

    /// Steps 4 and 5.
    fn draw_frame<A: App + ?Sized>(&mut self, app: &mut A) -> Result<AppControl> {
        let status = self
            .targets
            .backend_mut()
            .begin_frame()
            .context("failed to acquire frame")?;

        if status == FrameStatus::Skipped {
            log::debug!("frame skipped");
            return Ok(AppControl::Continue);
        }

        self.targets.bind();
        self.draw_list.reset();

        let time = self.clock.tick();
        let control = {
            let mut ctx = FrameCtx {
                view: &self.view,
                time,
                canvas: Canvas::new(&mut self.draw_list, &self.view),
            };
            app.on_frame(&mut ctx)?
        };

        let backend = self.targets.backend_mut();
        backend.draw(&self.draw_list).context("draw failed")?;

        self.targets
            .resolve(self.view.pixel_size())
            .context("failed to resolve render target")?;

        self.window.pre_present();
        self.targets
            .backend_mut()
            .present()
            .context("present failed")?;

        Ok(control)
    }

    fn teardown(&mut self) {
        self.targets.destroy();
        log::debug!("frame loop torn down");
    }
}

/// Window callbacks for one poll: converts notifications into queued input
/// and runtime flags.
struct LoopCallbacks<'a> {
    queue: &'a EventQueue,
    view: &'a LetterboxView,
    state: &'a mut WindowRuntimeState,
    close_on_escape: bool,
}

impl LoopCallbacks<'_> {
    /// Screen to virtual against the size the window has now. A resize
    /// signalled earlier in this poll is projected through a scratch copy;
    /// the shared view only changes when the resize is applied.
    fn screen_to_virtual(&self, screen: Vec2) -> Vec2 {
        if let Some(p) = self.state.pending_resize().filter(PendingResize::is_drawable) {
            let mut resized = self.view.clone();
            if resized.set_buffer_size(p.width as f32, p.height as f32).is_ok() {
                return resized.project_screen_point_to_virtual(screen);
            }
        }
        self.view.project_screen_point_to_virtual(screen)
    }
}

impl WindowCallbacks for LoopCallbacks<'_> {
    fn cursor_moved(&mut self, x: f64, y: f64) {
        let screen = Vec2::new(x as f32, y as f32);
        let v = self.screen_to_virtual(screen);
        log::debug!("cursor moved: {x:.1}, {y:.1} -> virtual {:.1}, {:.1}", v.x, v.y);

        self.queue.enqueue(MouseMovedEvent {
            screen_x: screen.x,
            screen_y: screen.y,
            virtual_x: v.x,
            virtual_y: v.y,
        });
    }

    fn mouse_button(&mut self, button: MouseButton, action: Action, modifiers: Modifiers) {
        log::debug!("mouse button: {button:?} {action:?}");
        self.queue.enqueue(MouseButtonEvent {
            button,
            action,
            modifiers,
        });
    }

    fn key(&mut self, code: Key, scancode: u32, action: Action, modifiers: Modifiers) {
        log::debug!("key: {code} ({scancode}) {action:?}");

        if self.close_on_escape && code == Key::Escape && action == Action::Release {
            self.state.request_close();
        }

        self.queue.enqueue(KeyEvent {
            code,
            scancode,
            action,
            modifiers,
        });
    }

    fn scroll(&mut self, dx: f64, dy: f64) {
        log::debug!("scroll: {dx}, {dy}");
        self.queue.enqueue(ScrollEvent { dx, dy });
    }

    fn window_resized(&mut self, width: u32, height: u32) {
        log::debug!("window resized: {width}x{height}");
        self.state.request_resize(width, height, ResizeSource::Window);
    }

    fn framebuffer_resized(&mut self, width: u32, height: u32) {
        log::debug!("framebuffer resized: {width}x{height}");
        self.state.request_resize(width, height, ResizeSource::Framebuffer);
    }

    fn close_requested(&mut self) {
        self.state.request_close();
    }
}
