//! Cairo-based rendering functions for the drawing canvas.

use super::color::Color;
use super::frame::Frame;
use super::shape::{Shape, triangle_vertices};
use std::io::Write;

/// Fills the whole context with the canvas background color.
///
/// Should be called before rendering shapes.
pub fn render_background(ctx: &cairo::Context, background: Color) {
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint(); // A failed paint just leaves the surface untouched
}

/// Renders all shapes in order (first shape = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape to a Cairo context.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Segment {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
        } => render_segment(ctx, *x1, *y1, *x2, *y2, *color, *thick),
        Shape::Circle {
            cx,
            cy,
            diameter,
            color,
            outline,
        } => {
            ctx.arc(*cx, *cy, diameter / 2.0, 0.0, 2.0 * std::f64::consts::PI);
            fill_and_outline(ctx, *color, *outline);
        }
        Shape::Square {
            cx,
            cy,
            side,
            color,
            outline,
        } => {
            ctx.rectangle(cx - side / 2.0, cy - side / 2.0, *side, *side);
            fill_and_outline(ctx, *color, *outline);
        }
        Shape::Triangle {
            cx,
            cy,
            size,
            color,
            outline,
        } => {
            let [apex, left, right] = triangle_vertices(*cx, *cy, *size);
            ctx.move_to(apex.0, apex.1);
            ctx.line_to(left.0, left.1);
            ctx.line_to(right.0, right.1);
            ctx.close_path();
            fill_and_outline(ctx, *color, *outline);
        }
    }
}

/// Renders a whole frame on top of a freshly painted background.
pub fn render_frame(ctx: &cairo::Context, frame: &Frame, background: Color) {
    render_background(ctx, background);
    render_shapes(ctx, &frame.shapes);
}

/// Rasterizes a frame into a PNG stream of the given size.
pub fn write_png<W: Write>(
    frame: &Frame,
    background: Color,
    width: u32,
    height: u32,
    out: &mut W,
) -> Result<(), RenderError> {
    let surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_frame(&ctx, frame, background);
    }
    surface.write_to_png(out)?;
    Ok(())
}

/// Errors raised while rasterizing the canvas.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

fn render_segment(ctx: &cairo::Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, thick: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();
}

fn fill_and_outline(ctx: &cairo::Context, color: Color, outline: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.fill_preserve();
    ctx.set_line_width(outline);
    ctx.set_line_join(cairo::LineJoin::Miter);
    let _ = ctx.stroke();
}
