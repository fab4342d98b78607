//! Test doubles for the backend seams.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use crate::error::BackendError;
use crate::input::{Action, Key, Modifiers, MouseButton};
use crate::render::DrawList;
use crate::target::{
    AttachmentFormat,
    FrameStatus,
    FramebufferId,
    FramebufferStatus,
    RenderBackend,
    RenderbufferId,
};
use crate::window::{WindowBackend, WindowCallbacks};

// ── render backend ────────────────────────────────────────────────────────

#[derive(Default)]
struct MockState {
    max_samples: u32,
    next_id: u32,

    renderbuffers: HashMap<RenderbufferId, (u32, u32)>,
    framebuffers: HashSet<FramebufferId>,
    created_framebuffers: usize,
    deleted_framebuffers: usize,

    incomplete: bool,
    allocations_left: Option<usize>,
    skip_frames: usize,

    frame_active: bool,
    bound: Option<FramebufferId>,

    calls: Vec<String>,
    configured: Vec<(u32, u32)>,
    draws: Vec<(Option<FramebufferId>, usize)>,
    blits: Vec<(FramebufferId, u32, u32)>,
    presents: usize,
}

/// Recording [`RenderBackend`]. State is shared with its [`MockHandle`], so it
/// stays observable after the backend is moved or dropped.
pub(crate) struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub(crate) fn new(max_samples: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                max_samples,
                next_id: 1,
                ..MockState::default()
            })),
        }
    }

    pub(crate) fn handle(&self) -> MockHandle {
        MockHandle {
            state: Rc::clone(&self.state),
        }
    }

    fn next_id(state: &mut MockState) -> u32 {
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

impl RenderBackend for MockBackend {
    fn max_samples(&self) -> u32 {
        self.state.borrow().max_samples
    }

    fn configure_surface(&mut self, width: u32, height: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("configure {width}x{height}"));
        s.configured.push((width, height));
    }

    fn create_renderbuffer(
        &mut self,
        format: AttachmentFormat,
        samples: u32,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferId, BackendError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("create_renderbuffer {format:?} {samples}x {width}x{height}"));

        if let Some(left) = s.allocations_left.as_mut() {
            if *left == 0 {
                return Err(BackendError::Allocation("scripted failure".into()));
            }
            *left -= 1;
        }

        let id = RenderbufferId(Self::next_id(&mut s));
        s.renderbuffers.insert(id, (width, height));
        Ok(id)
    }

    fn delete_renderbuffer(&mut self, id: RenderbufferId) {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("delete_renderbuffer {id:?}"));
        assert!(s.renderbuffers.remove(&id).is_some(), "double delete of {id:?}");
    }

    fn create_framebuffer(
        &mut self,
        color: RenderbufferId,
        depth: RenderbufferId,
    ) -> Result<FramebufferId, BackendError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("create_framebuffer {color:?} {depth:?}"));

        let id = FramebufferId(Self::next_id(&mut s));
        s.framebuffers.insert(id);
        s.created_framebuffers += 1;
        Ok(id)
    }

    fn framebuffer_status(&self, _id: FramebufferId) -> FramebufferStatus {
        if self.state.borrow().incomplete {
            FramebufferStatus::Incomplete("scripted incomplete attachment".into())
        } else {
            FramebufferStatus::Complete
        }
    }

    fn delete_framebuffer(&mut self, id: FramebufferId) {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("delete_framebuffer {id:?}"));
        assert!(s.framebuffers.remove(&id), "double delete of {id:?}");
        s.deleted_framebuffers += 1;
        if s.bound == Some(id) {
            s.bound = None;
        }
    }

    fn begin_frame(&mut self) -> Result<FrameStatus, BackendError> {
        let mut s = self.state.borrow_mut();
        s.calls.push("begin_frame".into());

        if s.skip_frames > 0 {
            s.skip_frames -= 1;
            return Ok(FrameStatus::Skipped);
        }
        s.frame_active = true;
        Ok(FrameStatus::Ready)
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        self.state.borrow_mut().bound = id;
    }

    fn draw(&mut self, list: &DrawList) -> Result<(), BackendError> {
        let mut s = self.state.borrow_mut();
        if !s.frame_active {
            return Err(BackendError::NoActiveFrame);
        }
        let bound = s.bound;
        s.calls.push("draw".into());
        s.draws.push((bound, list.triangle_count()));
        Ok(())
    }

    fn blit_to_surface(
        &mut self,
        source: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), BackendError> {
        let mut s = self.state.borrow_mut();
        if !s.framebuffers.contains(&source) {
            return Err(BackendError::UnknownFramebuffer(source));
        }
        s.calls.push(format!("blit {width}x{height}"));
        s.blits.push((source, width, height));
        Ok(())
    }

    fn present(&mut self) -> Result<(), BackendError> {
        let mut s = self.state.borrow_mut();
        if !s.frame_active {
            return Err(BackendError::NoActiveFrame);
        }
        s.frame_active = false;
        s.calls.push("present".into());
        s.presents += 1;
        Ok(())
    }
}

/// Observer and script controller for a [`MockBackend`].
#[derive(Clone)]
pub(crate) struct MockHandle {
    state: Rc<RefCell<MockState>>,
}

impl MockHandle {
    pub(crate) fn live_renderbuffers(&self) -> usize {
        self.state.borrow().renderbuffers.len()
    }

    pub(crate) fn live_framebuffers(&self) -> usize {
        self.state.borrow().framebuffers.len()
    }

    pub(crate) fn created_framebuffers(&self) -> usize {
        self.state.borrow().created_framebuffers
    }

    pub(crate) fn deleted_framebuffers(&self) -> usize {
        self.state.borrow().deleted_framebuffers
    }

    pub(crate) fn set_incomplete(&self, incomplete: bool) {
        self.state.borrow_mut().incomplete = incomplete;
    }

    /// Lets `n` more renderbuffer allocations succeed, then fails them.
    pub(crate) fn fail_allocation_after(&self, n: usize) {
        self.state.borrow_mut().allocations_left = Some(n);
    }

    pub(crate) fn skip_next_frames(&self, n: usize) {
        self.state.borrow_mut().skip_frames = n;
    }

    pub(crate) fn bound(&self) -> Option<FramebufferId> {
        self.state.borrow().bound
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn configured(&self) -> Vec<(u32, u32)> {
        self.state.borrow().configured.clone()
    }

    pub(crate) fn draws(&self) -> Vec<(Option<FramebufferId>, usize)> {
        self.state.borrow().draws.clone()
    }

    pub(crate) fn blits(&self) -> Vec<(FramebufferId, u32, u32)> {
        self.state.borrow().blits.clone()
    }

    pub(crate) fn presents(&self) -> usize {
        self.state.borrow().presents
    }
}

// ── window backend ────────────────────────────────────────────────────────

/// One scripted window notification.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WindowCall {
    Cursor(f64, f64),
    Button(MouseButton, Action),
    Key(Key, Action),
    Scroll(f64, f64),
    WindowResized(u32, u32),
    FramebufferResized(u32, u32),
    Close,
}

#[derive(Default)]
struct WindowLog {
    waits: Vec<Option<Duration>>,
    pre_presents: usize,
}

/// [`WindowBackend`] that replays one script per poll and requests close
/// once the scripts run out.
pub(crate) struct ScriptedWindow {
    size: (u32, u32),
    scripts: VecDeque<Vec<WindowCall>>,
    log: Rc<RefCell<WindowLog>>,
}

impl ScriptedWindow {
    pub(crate) fn new(size: (u32, u32), scripts: Vec<Vec<WindowCall>>) -> Self {
        Self {
            size,
            scripts: scripts.into(),
            log: Rc::default(),
        }
    }

    pub(crate) fn handle(&self) -> WindowHandle {
        WindowHandle {
            log: Rc::clone(&self.log),
        }
    }
}

impl WindowBackend for ScriptedWindow {
    fn poll_events(&mut self, wait: Option<Duration>, cb: &mut dyn WindowCallbacks) -> Result<()> {
        self.log.borrow_mut().waits.push(wait);

        let Some(script) = self.scripts.pop_front() else {
            cb.close_requested();
            return Ok(());
        };

        for call in script {
            match call {
                WindowCall::Cursor(x, y) => cb.cursor_moved(x, y),
                WindowCall::Button(b, a) => cb.mouse_button(b, a, Modifiers::default()),
                WindowCall::Key(k, a) => cb.key(k, 0, a, Modifiers::default()),
                WindowCall::Scroll(dx, dy) => cb.scroll(dx, dy),
                WindowCall::WindowResized(w, h) => cb.window_resized(w, h),
                WindowCall::FramebufferResized(w, h) => {
                    self.size = (w, h);
                    cb.framebuffer_resized(w, h)
                }
                WindowCall::Close => cb.close_requested(),
            }
        }
        Ok(())
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn pre_present(&self) {
        self.log.borrow_mut().pre_presents += 1;
    }
}

pub(crate) struct WindowHandle {
    log: Rc<RefCell<WindowLog>>,
}

impl WindowHandle {
    pub(crate) fn waits(&self) -> Vec<Option<Duration>> {
        self.log.borrow().waits.clone()
    }

    pub(crate) fn pre_presents(&self) -> usize {
        self.log.borrow().pre_presents
    }
}
