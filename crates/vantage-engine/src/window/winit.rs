use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::RuntimeConfig;
use crate::input::{Action, Key, Modifiers, MouseButton};

use super::backend::{WindowBackend, WindowCallbacks};

/// Pixel-precise scroll deltas are reported in lines of this many pixels.
const PIXELS_PER_LINE: f64 = 16.0;

/// Upper bound on pumps spent waiting for the platform to resume the app.
const STARTUP_PUMPS: usize = 200;
const STARTUP_PUMP_WAIT: Duration = Duration::from_millis(10);

/// Single winit window driven by pumping the event loop once per frame.
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    shared: Shared,
}

/// State that outlives a single pump.
struct Shared {
    attrs: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    modifiers: Modifiers,
    create_error: Option<String>,
}

impl WinitWindow {
    /// Creates the event loop and pumps it until the window exists.
    pub fn open(config: &RuntimeConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size);

        let mut this = Self {
            event_loop,
            shared: Shared {
                attrs: Some(attrs),
                window: None,
                modifiers: Modifiers::default(),
                create_error: None,
            },
        };

        // Events delivered before the window exists are of no interest; the
        // initial size is read back through `framebuffer_size`.
        let mut discard = Discard;
        for _ in 0..STARTUP_PUMPS {
            this.poll_events(Some(STARTUP_PUMP_WAIT), &mut discard)?;

            if let Some(err) = this.shared.create_error.take() {
                bail!("failed to create window: {err}");
            }
            if this.shared.window.is_some() {
                return Ok(this);
            }
        }

        bail!("platform never resumed the application; no window was created")
    }

    /// Shared handle to the window, e.g. for surface creation.
    pub fn window(&self) -> Option<Arc<Window>> {
        self.shared.window.clone()
    }
}

impl WindowBackend for WinitWindow {
    fn poll_events(&mut self, wait: Option<Duration>, callbacks: &mut dyn WindowCallbacks) -> Result<()> {
        let mut pump = Pump {
            shared: &mut self.shared,
            callbacks: &mut *callbacks,
        };

        let timeout = wait.unwrap_or(Duration::ZERO);
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(timeout), &mut pump) {
            log::info!("event loop exited with code {code}");
            callbacks.close_requested();
        }

        Ok(())
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.shared
            .window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                (size.width, size.height)
            })
            .unwrap_or((0, 0))
    }

    fn pre_present(&self) {
        if let Some(w) = &self.shared.window {
            w.pre_present_notify();
        }
    }
}

/// Per-pump adapter from winit's handler to [`WindowCallbacks`].
struct Pump<'a> {
    shared: &'a mut Shared,
    callbacks: &'a mut dyn WindowCallbacks,
}

impl ApplicationHandler for Pump<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attrs) = self.shared.attrs.take() else {
            return;
        };

        match event_loop.create_window(attrs) {
            Ok(window) => {
                log::info!("window created: {:?}", window.inner_size());
                self.shared.window = Some(Arc::new(window));
            }
            Err(e) => self.shared.create_error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.shared.window.as_ref() else {
            return;
        };
        let cb = &mut *self.callbacks;

        match event {
            WindowEvent::CloseRequested => cb.close_requested(),

            // A scale factor change is followed by its own `Resized`.
            WindowEvent::Resized(size) => emit_resized(cb, size, window.scale_factor()),

            WindowEvent::ModifiersChanged(m) => {
                self.shared.modifiers = map_modifiers(m.state());
            }

            WindowEvent::CursorMoved { position, .. } => cb.cursor_moved(position.x, position.y),

            WindowEvent::MouseInput { state, button, .. } => {
                let action = map_action(state, false);
                cb.mouse_button(map_mouse_button(button), action, self.shared.modifiers);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = scroll_lines(delta);
                cb.scroll(dx, dy);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let action = map_action(event.state, event.repeat);
                let (key, scancode) = map_key(event.physical_key);
                cb.key(key, scancode, action, self.shared.modifiers);
            }

            _ => {}
        }
    }
}

/// Sink for events that arrive while the window is being created.
struct Discard;

impl WindowCallbacks for Discard {
    fn cursor_moved(&mut self, _x: f64, _y: f64) {}
    fn mouse_button(&mut self, _button: MouseButton, _action: Action, _modifiers: Modifiers) {}
    fn key(&mut self, _code: Key, _scancode: u32, _action: Action, _modifiers: Modifiers) {}
    fn scroll(&mut self, _dx: f64, _dy: f64) {}
    fn window_resized(&mut self, _width: u32, _height: u32) {}
    fn framebuffer_resized(&mut self, _width: u32, _height: u32) {}
    fn close_requested(&mut self) {}
}

/// Reports the logical window size, then the physical framebuffer size.
fn emit_resized(cb: &mut dyn WindowCallbacks, size: PhysicalSize<u32>, scale_factor: f64) {
    let logical = size.to_logical::<f64>(scale_factor);
    cb.window_resized(logical.width.round() as u32, logical.height.round() as u32);
    cb.framebuffer_resized(size.width, size.height);
}

fn scroll_lines(delta: MouseScrollDelta) -> (f64, f64) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
        MouseScrollDelta::PixelDelta(p) => (p.x / PIXELS_PER_LINE, p.y / PIXELS_PER_LINE),
    }
}

fn map_action(state: ElementState, repeat: bool) -> Action {
    match (state, repeat) {
        (ElementState::Pressed, false) => Action::Press,
        (ElementState::Pressed, true) => Action::Repeat,
        (ElementState::Released, _) => Action::Release,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

/// Maps a physical key to `(key, scancode)`.
fn map_key(pk: PhysicalKey) -> (Key, u32) {
    let code = match pk {
        PhysicalKey::Code(code) => code,
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => return (Key::Unknown(0), 0),
    };

    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    };

    (key, code as u32)
}
