//! Grid demo: a 1920x1080 virtual area letterboxed into the window, with the
//! hovered grid cell highlighted and guide lines drawn to the pointer.
//!
//! Press Escape to quit.

use anyhow::Result;
use vantage_engine::coords::{Rect, Vec2};
use vantage_engine::core::{App, AppControl, FrameCtx};
use vantage_engine::device::GpuInit;
use vantage_engine::input::{InputSink, InputState, KeyEvent, MouseButtonEvent, MouseMovedEvent, ScrollEvent};
use vantage_engine::logging::{LoggingConfig, init_logging};
use vantage_engine::paint::Color;
use vantage_engine::window::Runtime;
use vantage_engine::RuntimeConfig;

const GRID_COLUMNS: f32 = 32.0;

/// Half extent of the box drawn around the pointer, in virtual units.
const CURSOR_HALF: Vec2 = Vec2::new(24.0, 24.0);

const LINE_PX: f32 = 1.0;

struct GridDemo {
    input: InputState,
}

impl GridDemo {
    fn new() -> Self {
        Self {
            input: InputState::default(),
        }
    }
}

impl InputSink for GridDemo {
    fn mouse_moved(&mut self, e: MouseMovedEvent) {
        self.input.mouse_moved(e);
    }

    fn mouse_button(&mut self, e: MouseButtonEvent) {
        log::info!("{:?} {:?}", e.button, e.action);
        self.input.mouse_button(e);
    }

    fn key(&mut self, e: KeyEvent) {
        self.input.key(e);
    }

    fn scroll(&mut self, e: ScrollEvent) {
        self.input.scroll(e);
    }
}

impl App for GridDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl> {
        let virt = ctx.view.virtual_size();
        let cell = (virt.x / GRID_COLUMNS).floor();

        let background = Color::rgb(0.0, 1.0, 0.0);
        let highlight = Color::rgb(0.3, 0.5, 0.3);
        let grid = Color::from_straight(0.0, 0.0, 0.0, 0.5);
        let guide = Color::from_straight(1.0, 1.0, 1.0, 0.5);

        let canvas = &mut ctx.canvas;
        canvas.clear(Color::TRANSPARENT);
        canvas.fill_content(background);

        let pointer_screen = self.input.pointer_screen;
        let pointer_virtual = pointer_screen.map(|p| ctx.view.project_screen_point_to_virtual(p));

        if let Some(p) = pointer_virtual {
            let gx = (p.x / cell).floor() * cell;
            let gy = (p.y / cell).floor() * cell;
            if gx >= 0.0 && gx < virt.x && gy >= 0.0 && gy < virt.y {
                canvas.fill_virtual(Rect::new(gx, gy, cell, cell), highlight);
            }
        }

        let mut x = cell;
        while x <= virt.x - cell {
            canvas.line_virtual(Vec2::new(x, 0.0), Vec2::new(x, virt.y), LINE_PX, grid);
            x += cell;
        }
        let mut y = cell;
        while y <= virt.y - cell {
            canvas.line_virtual(Vec2::new(0.0, y), Vec2::new(virt.x, y), LINE_PX, grid);
            y += cell;
        }

        canvas.line_virtual(Vec2::zero(), virt * 0.5, LINE_PX, guide);

        if let (Some(screen), Some(virtual_pos)) = (pointer_screen, pointer_virtual) {
            canvas.line_screen(Vec2::zero(), screen, LINE_PX, guide);
            canvas.line_virtual(Vec2::zero(), virtual_pos, LINE_PX, guide);

            let cursor = ctx.view.project_virtual_rect(Rect::from_corners(
                virtual_pos - CURSOR_HALF,
                virtual_pos + CURSOR_HALF,
            ));
            let min = ctx.view.project_normalized_to_screen(cursor.min());
            let max = ctx.view.project_normalized_to_screen(cursor.max());
            canvas.stroke_screen_rect(Rect::from_corners(min, max), LINE_PX, guide);
        }

        self.input.end_frame();
        Ok(AppControl::Continue)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), GridDemo::new())
}
