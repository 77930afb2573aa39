//! Raster surface: RenderCommand → PNG bytes via plotters.

use crate::plot::types::*;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::prelude::*;

/// Background color (Catppuccin Mocha base).
const BG_COLOR: RGBColor = RGBColor(30, 30, 46);
/// Axis / grid color.
const AXIS_COLOR: RGBColor = RGBColor(88, 91, 112);

/// Rasterize one frame. The previous frame is never reused: every call
/// starts from a cleared canvas.
pub fn rasterize(cmd: &RenderCommand) -> Result<RenderedFrame, String> {
    rasterize_sized(cmd, PLOT_WIDTH, PLOT_HEIGHT)
}

pub fn rasterize_sized(cmd: &RenderCommand, width: u32, height: u32) -> Result<RenderedFrame, String> {
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BG_COLOR).map_err(|e| format!("fill: {}", e))?;

        let (x0, x1) = cmd.limits.x;
        let (y0, y1) = cmd.limits.y;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(|e| format!("chart build: {}", e))?;

        chart
            .configure_mesh()
            .axis_style(AXIS_COLOR)
            .bold_line_style(AXIS_COLOR.mix(0.3))
            .light_line_style(AXIS_COLOR.mix(0.1))
            .x_labels(0)
            .y_labels(0)
            .draw()
            .map_err(|e| format!("mesh: {}", e))?;

        for seg in &cmd.segments {
            let color: RGBColor = seg.color.into();
            chart
                .draw_series(LineSeries::new([seg.from, seg.to], color.stroke_width(TRAIL_WIDTH)))
                .map_err(|e| format!("draw segment: {}", e))?;
        }

        let (r, g, b) = MARKER_COLOR;
        let marker = RGBColor(r, g, b).filled();
        chart
            .draw_series(cmd.markers.iter().map(|&p| Circle::new(p, MARKER_SIZE, marker)))
            .map_err(|e| format!("draw markers: {}", e))?;

        root.present().map_err(|e| format!("present: {}", e))?;
    }

    let png_bytes = encode_rgb_to_png(&buf, width, height)?;

    Ok(RenderedFrame {
        frame_index: cmd.frame_index,
        png_bytes,
        width,
        height,
    })
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| format!("PNG encode: {}", e))?;
    Ok(png)
}
