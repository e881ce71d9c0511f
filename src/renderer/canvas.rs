//! Canvas 2D backend
//!
//! Executes a display list on a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::shapes::{DrawCmd, build_frame};
use crate::sim::GameState;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Map CSS pixels onto the backing store
    pub fn set_pixel_ratio(&self, dpr: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    /// Draw the current frame
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        self.execute(&build_frame(state))
    }

    pub fn execute(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { size } => {
                    ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
                }
                DrawCmd::FillRect { pos, size, color } => {
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::VerticalGradient {
                    pos,
                    size,
                    top,
                    bottom,
                } => {
                    let grad = ctx.create_linear_gradient(
                        pos.x as f64,
                        pos.y as f64,
                        pos.x as f64,
                        (pos.y + size.y) as f64,
                    );
                    grad.add_color_stop(0.0, &top.css())?;
                    grad.add_color_stop(1.0, &bottom.css())?;
                    ctx.set_fill_style_canvas_gradient(&grad);
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.set_fill_style_str(&color.css());
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
                DrawCmd::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.stroke();
                }
                DrawCmd::FillEllipse {
                    center,
                    radii,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.set_fill_style_str(&color.css());
                    ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        0.0,
                        TAU,
                    )?;
                    ctx.fill();
                }
                DrawCmd::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCmd::FillRoundRect {
                    pos,
                    size,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.css());
                    self.round_rect_path(*pos, *size, *radius)?;
                    ctx.fill();
                }
                DrawCmd::PushTransform { translate, rotate } => {
                    ctx.save();
                    ctx.translate(translate.x as f64, translate.y as f64)?;
                    ctx.rotate(*rotate as f64)?;
                }
                DrawCmd::PopTransform => ctx.restore(),
            }
        }
        Ok(())
    }

    fn round_rect_path(&self, pos: Vec2, size: Vec2, radius: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y) = (pos.x as f64, pos.y as f64);
        let (w, h) = (size.x as f64, size.y as f64);
        let r = radius as f64;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }
}
