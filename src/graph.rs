use anyhow::{anyhow, Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::ir::{Axis, DrawCommand, LegendEntry, Orientation, SceneGraph};
use crate::{OutputFormat, RenderOptions};

/// Style configuration for line primitives
#[derive(Debug, Clone)]
pub struct LineStyle {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub alpha: Option<f64>,
}

/// Style configuration for point primitives
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: Option<String>,
    pub size: Option<f64>,
    pub alpha: Option<f64>,
}

/// Style configuration for rectangle primitives
#[derive(Debug, Clone)]
pub struct BarStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub alpha: Option<f64>,
}

const TICK_LEN: i32 = 4;

/// Execute a scene graph and encode it in the requested output format.
pub fn render_scene(scene: &SceneGraph, options: &RenderOptions) -> Result<Vec<u8>> {
    match options.format {
        OutputFormat::Png => render_png(scene),
        OutputFormat::Svg => render_svg(scene),
    }
}

fn render_png(scene: &SceneGraph) -> Result<Vec<u8>> {
    let (width, height) = (scene.width, scene.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).context("Failed to fill background")?;
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

fn render_svg(scene: &SceneGraph) -> Result<Vec<u8>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (scene.width, scene.height))
            .into_drawing_area();
        root.fill(&WHITE).context("Failed to fill background")?;
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }
    Ok(svg.into_bytes())
}

fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &SceneGraph) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if let Some(title) = &scene.title {
        let style = TextStyle::from(("sans-serif", 20).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            title.clone(),
            (scene.width as i32 / 2, 10),
            style,
        ))
        .map_err(|e| anyhow!("Failed to draw title: {}", e))?;
    }

    for axis in &scene.axes {
        draw_axis(root, axis)?;
    }

    for command in &scene.commands {
        draw_command(root, command)?;
    }

    draw_legend(root, scene)?;

    Ok(())
}

fn draw_axis<DB>(root: &DrawingArea<DB, Shift>, axis: &Axis) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    root.draw(&PathElement::new(
        vec![px(axis.start), px(axis.end)],
        BLACK.stroke_width(1),
    ))
    .map_err(|e| anyhow!("Failed to draw axis line: {}", e))?;

    let tick_font = ("sans-serif", 12).into_font();
    for tick in &axis.ticks {
        let (x, y) = px(tick.at);
        let (mark_end, text_at, anchor) = match axis.orientation {
            Orientation::Horizontal => (
                (x, y + TICK_LEN),
                (x, y + TICK_LEN + 2),
                Pos::new(HPos::Center, VPos::Top),
            ),
            Orientation::Vertical => (
                (x - TICK_LEN, y),
                (x - TICK_LEN - 2, y),
                Pos::new(HPos::Right, VPos::Center),
            ),
        };

        root.draw(&PathElement::new(vec![(x, y), mark_end], BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("Failed to draw tick mark: {}", e))?;
        root.draw(&Text::new(
            tick.text.clone(),
            text_at,
            TextStyle::from(tick_font.clone()).pos(anchor),
        ))
        .map_err(|e| anyhow!("Failed to draw tick label: {}", e))?;
    }

    if let Some(label) = &axis.label {
        let mut style = TextStyle::from(("sans-serif", 14).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        if label.rotated {
            style = style.transform(FontTransform::Rotate270);
        }
        root.draw(&Text::new(label.text.clone(), px(label.at), style))
            .map_err(|e| anyhow!("Failed to draw axis label: {}", e))?;
    }

    Ok(())
}

fn draw_command<DB>(root: &DrawingArea<DB, Shift>, command: &DrawCommand) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    match command {
        DrawCommand::Line { points, style } => {
            let color = parse_color(style.color.as_deref());
            let color = color.mix(style.alpha.unwrap_or(1.0));
            let width = style.width.unwrap_or(1.0).round().max(1.0) as u32;
            root.draw(&PathElement::new(
                points.iter().map(|&p| px(p)).collect::<Vec<_>>(),
                color.stroke_width(width),
            ))
            .map_err(|e| anyhow!("Failed to draw line: {}", e))?;
        }
        DrawCommand::Rect { tl, br, style } => {
            if let Some(fill) = &style.fill {
                let color = parse_color(Some(fill)).mix(style.alpha.unwrap_or(1.0));
                root.draw(&Rectangle::new([px(*tl), px(*br)], color.filled()))
                    .map_err(|e| anyhow!("Failed to draw rect: {}", e))?;
            }
            if let Some(stroke) = &style.stroke {
                let color = parse_color(Some(stroke));
                root.draw(&Rectangle::new([px(*tl), px(*br)], color.stroke_width(1)))
                    .map_err(|e| anyhow!("Failed to draw rect outline: {}", e))?;
            }
        }
        DrawCommand::Points { points, style } => {
            let color = parse_color(style.color.as_deref());
            let color = color.mix(style.alpha.unwrap_or(1.0));
            let radius = style.size.unwrap_or(3.0).round().max(1.0) as i32;
            for &point in points {
                root.draw(&Circle::new(px(point), radius, color.filled()))
                    .map_err(|e| anyhow!("Failed to draw point: {}", e))?;
            }
        }
    }
    Ok(())
}

fn draw_legend<DB>(root: &DrawingArea<DB, Shift>, scene: &SceneGraph) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if scene.legend.is_empty() {
        return Ok(());
    }

    let origin_x = scene.width as i32 - 150;
    let origin_y = 10;
    let font = ("sans-serif", 12).into_font();

    for (i, LegendEntry { label, color }) in scene.legend.iter().enumerate() {
        let y = origin_y + i as i32 * 20;
        root.draw(&Rectangle::new(
            [(origin_x, y), (origin_x + 15, y + 15)],
            parse_color(Some(color)).filled(),
        ))
        .map_err(|e| anyhow!("Failed to draw legend swatch: {}", e))?;
        root.draw(&Text::new(
            label.clone(),
            (origin_x + 20, y + 7),
            TextStyle::from(font.clone()).pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(|e| anyhow!("Failed to draw legend label: {}", e))?;
    }

    Ok(())
}

fn px(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

/// Parse a `#rrggbb` hex color or a small set of names, defaulting to black.
fn parse_color(color_str: Option<&str>) -> RGBColor {
    if let Some(s) = color_str {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
    }

    match color_str {
        Some("red") => RED,
        Some("green") => GREEN,
        Some("blue") => BLUE,
        Some("yellow") => YELLOW,
        Some("cyan") => CYAN,
        Some("magenta") => MAGENTA,
        Some("white") => WHITE,
        _ => BLACK,
    }
}
