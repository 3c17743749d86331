//! Paints a [`Figure`] with plotters: **SVG** or bitmap files, or an in-memory RGB buffer.
//!
//! - Subplots laid out on an even grid, row-major
//! - 2D subplots with mesh, tick labels and axis descriptions; 3D subplots with a rotatable projection
//! - Per-subplot captions and legends
//! - TeX-style labels (`$f_1$`) rendered as Unicode (`f₁`)

pub mod markers;
pub mod text;

use crate::colormap::Rgb8;
use crate::config::FontChoice;
use crate::error::{Result, render_err};
use crate::figure::{Artist, ArtistStyle, Axes, Figure, Projection, TextAlign};
use crate::format::tick_label;
use crate::models::{BBox, LegendPosition, LegendSpec, SaveOptions};

use plotters::chart::ChartContext;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use markers::{draw_markers, fill_style, line_style, rgba_color};
use text::{tex_to_unicode, truncate_to_width};

/// One-time registration of the bundled fonts when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let fonts: [(&str, &'static [u8]); 2] = [
            ("serif", include_bytes!("../../assets/DejaVuSerif.ttf")),
            ("sans-serif", include_bytes!("../../assets/DejaVuSans.ttf")),
        ];
        for (name, bytes) in fonts {
            if plotters::style::register_font(name, plotters::style::FontStyle::Normal, bytes)
                .is_err()
            {
                log::warn!("could not register {name} font");
            }
        }
    });
}

/// Outer padding (px) around the subplot grid.
const STANDARD_PAD: i32 = 12;

/// Paint `figure` to `path`; the format follows the extension (`.svg` or a bitmap type).
pub fn render_to_file(figure: &Figure, path: &Path, options: &SaveOptions) -> Result<()> {
    ensure_fonts_registered();
    let (w, h) = figure.size();
    let path_string = path.to_string_lossy().into_owned();

    let is_svg = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_figure(&root, figure, options)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_figure(&root, figure, options)?;
        root.present().map_err(render_err)?;
    }
    log::info!("wrote figure to {}", path.display());
    Ok(())
}

/// Paint `figure` into a `width * height * 3` RGB buffer.
pub fn render_to_rgb(figure: &Figure, options: &SaveOptions) -> Result<Vec<u8>> {
    ensure_fonts_registered();
    let (w, h) = figure.size();
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_figure(&root, figure, options)?;
        root.present().map_err(render_err)?;
    }
    Ok(buf)
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure, options: &SaveOptions) -> Result<()>
where
    DB: DrawingBackend,
{
    let background = options.background.unwrap_or(Rgb8::WHITE);
    root.fill(&RGBColor::from(background)).map_err(render_err)?;

    let Some(axes) = figure.axes() else {
        // blank surface
        return Ok(());
    };

    let pad = match options.bbox {
        Some(BBox::Tight) => 0,
        _ => STANDARD_PAD,
    };
    let area = root.margin(pad, pad, pad, pad);
    let cells = area.split_evenly(axes.shape());
    let margin: u32 = if figure.tight_layout() { 4 } else { 16 };

    log::debug!(
        "painting {} subplot(s) on a {}x{} figure",
        axes.len(),
        figure.size().0,
        figure.size().1
    );
    for (ax, cell) in axes.iter().zip(cells.iter()) {
        if ax.is_3d() {
            draw_axes_3d(cell, ax, figure.font(), margin)?;
        } else {
            draw_axes_2d(cell, ax, figure.font(), margin)?;
        }
    }
    Ok(())
}

fn text_style(font: FontChoice, px: u32, align: TextAlign) -> TextStyle<'static> {
    let h = match align {
        TextAlign::Left => HPos::Left,
        TextAlign::Center => HPos::Center,
        TextAlign::Right => HPos::Right,
    };
    TextStyle::from(font.font(px)).pos(Pos::new(h, VPos::Center))
}

fn legend_glyph(style: &ArtistStyle) -> impl Fn((i32, i32)) -> Circle<(i32, i32), i32> + 'static {
    let color = rgba_color(style.color, 1.0);
    move |(x, y)| Circle::new((x + 8, y), 4, color.filled())
}

fn series_label_position(pos: LegendPosition) -> SeriesLabelPosition {
    match pos {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

fn draw_legend<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
    legend: &LegendSpec,
    font: FontChoice,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(series_label_position(legend.position))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(font.font(legend.font_px))
        .draw()
        .map_err(render_err)
}

/// Caption text fitted to the subplot width.
fn caption_for(ax: &Axes, area_w: u32, margin: u32) -> Option<(String, u32)> {
    let (title, px) = ax.title.as_ref()?;
    let title = tex_to_unicode(title.trim());
    if title.is_empty() {
        return None;
    }
    let max_px = area_w.saturating_sub(2 * margin).max(16);
    Some((truncate_to_width(&title, *px, max_px), *px))
}

fn draw_axes_2d<DB>(area: &DrawingArea<DB, Shift>, ax: &Axes, font: FontChoice, margin: u32) -> Result<()>
where
    DB: DrawingBackend,
{
    let (area_w, _) = area.dim_in_pixel();
    let mut builder = ChartBuilder::on(area);
    builder.margin(margin);
    if let Some((caption, px)) = caption_for(ax, area_w, margin) {
        builder.caption(caption, font.font(px));
    }
    if ax.axis_visible {
        let bottom = if ax.x_label.is_some() { 44 } else { 28 };
        let left = if ax.y_label.is_some() { 64 } else { 48 };
        builder.x_label_area_size(bottom).y_label_area_size(left);
    }
    let mut chart = builder
        .build_cartesian_2d(ax.data_range(0), ax.data_range(1))
        .map_err(render_err)?;

    if ax.axis_visible {
        let x_fmt = |v: &f64| tick_label(*v);
        let y_fmt = |v: &f64| tick_label(*v);
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(6)
            .y_labels(6)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style(font.font(12))
            .axis_desc_style(font.font(14));
        if let Some(label) = &ax.x_label {
            mesh.x_desc(tex_to_unicode(label));
        }
        if let Some(label) = &ax.y_label {
            mesh.y_desc(tex_to_unicode(label));
        }
        mesh.draw().map_err(render_err)?;
    }

    for artist in &ax.artists {
        match artist {
            Artist::Markers {
                points,
                style,
                label,
            } => {
                let size = style.marker_size as i32;
                let st = fill_style(style);
                let coords = points.iter().map(|p| (p[0], p[1]));
                let anno =
                    draw_markers!(chart, coords, size, st, style.marker).map_err(render_err)?;
                if let Some(label) = label {
                    anno.label(tex_to_unicode(label)).legend(legend_glyph(style));
                }
            }
            Artist::Polyline {
                points,
                style,
                label,
            } => {
                let anno = chart
                    .draw_series(LineSeries::new(
                        points.iter().map(|p| (p[0], p[1])),
                        line_style(style),
                    ))
                    .map_err(render_err)?;
                if let Some(label) = label {
                    anno.label(tex_to_unicode(label)).legend(legend_glyph(style));
                }
            }
            Artist::Text {
                at,
                text,
                font_px,
                align,
            } => {
                chart
                    .draw_series(std::iter::once(Text::new(
                        tex_to_unicode(text),
                        (at[0], at[1]),
                        text_style(font, *font_px, *align),
                    )))
                    .map_err(render_err)?;
            }
        }
    }

    if let Some(legend) = &ax.legend
        && legend.enabled
        && ax.has_labels()
    {
        draw_legend(&mut chart, legend, font)?;
    }
    Ok(())
}

/// Matplotlib-style (x, y, z) with z pointing up, mapped onto plotters' y-up 3D space.
fn to_3d(p: &[f64; 3]) -> (f64, f64, f64) {
    (p[0], p[2], p[1])
}

fn draw_axes_3d<DB>(area: &DrawingArea<DB, Shift>, ax: &Axes, font: FontChoice, margin: u32) -> Result<()>
where
    DB: DrawingBackend,
{
    let (x, y, z) = (ax.data_range(0), ax.data_range(1), ax.data_range(2));
    let (area_w, _) = area.dim_in_pixel();
    let mut builder = ChartBuilder::on(area);
    builder.margin(margin);
    if let Some((caption, px)) = caption_for(ax, area_w, margin) {
        builder.caption(caption, font.font(px));
    }
    let mut chart = builder
        .build_cartesian_3d(x.clone(), z.clone(), y.clone())
        .map_err(render_err)?;

    if let Projection::Cartesian3d {
        elevation,
        azimuth,
    } = ax.projection
    {
        chart.with_projection(|mut pb| {
            pb.pitch = elevation.to_radians();
            pb.yaw = azimuth.to_radians();
            pb.scale = 0.8;
            pb.into_matrix()
        });
    }

    if ax.axis_visible {
        chart
            .configure_axes()
            .label_style(font.font(11))
            .max_light_lines(4)
            .draw()
            .map_err(render_err)?;

        // axis descriptions sit at the far end of each axis
        let descriptions = [
            (&ax.x_label, [x.end, y.start, z.start]),
            (&ax.y_label, [x.start, y.end, z.start]),
            (&ax.z_label, [x.start, y.start, z.end]),
        ];
        chart
            .draw_series(descriptions.iter().filter_map(|(label, at)| {
                label.as_deref().map(|l| {
                    Text::new(
                        tex_to_unicode(l),
                        to_3d(at),
                        text_style(font, 14, TextAlign::Center),
                    )
                })
            }))
            .map_err(render_err)?;
    }

    for artist in &ax.artists {
        match artist {
            Artist::Markers {
                points,
                style,
                label,
            } => {
                let size = style.marker_size as i32;
                let st = fill_style(style);
                let coords = points.iter().map(to_3d);
                let anno =
                    draw_markers!(chart, coords, size, st, style.marker).map_err(render_err)?;
                if let Some(label) = label {
                    anno.label(tex_to_unicode(label)).legend(legend_glyph(style));
                }
            }
            Artist::Polyline {
                points,
                style,
                label,
            } => {
                let anno = chart
                    .draw_series(LineSeries::new(points.iter().map(to_3d), line_style(style)))
                    .map_err(render_err)?;
                if let Some(label) = label {
                    anno.label(tex_to_unicode(label)).legend(legend_glyph(style));
                }
            }
            Artist::Text {
                at,
                text,
                font_px,
                align,
            } => {
                chart
                    .draw_series(std::iter::once(Text::new(
                        tex_to_unicode(text),
                        to_3d(at),
                        text_style(font, *font_px, *align),
                    )))
                    .map_err(render_err)?;
            }
        }
    }

    if let Some(legend) = &ax.legend
        && legend.enabled
        && ax.has_labels()
    {
        draw_legend(&mut chart, legend, font)?;
    }
    Ok(())
}
