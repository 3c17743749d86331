//! Adapter helpers turning [`ArtistStyle`] into plotters styles and marker elements.

use plotters::prelude::*;

use crate::colormap::Rgb8;
use crate::figure::ArtistStyle;

pub fn rgba_color(color: Rgb8, alpha: f64) -> RGBAColor {
    RGBColor::from(color).mix(alpha.clamp(0.0, 1.0))
}

/// Build a ShapeStyle for line strokes.
pub fn line_style(style: &ArtistStyle) -> ShapeStyle {
    rgba_color(style.color, style.alpha).stroke_width(style.line_width)
}

/// Build a filled style for markers.
pub fn fill_style(style: &ArtistStyle) -> ShapeStyle {
    rgba_color(style.color, style.alpha).filled()
}

/// Draw one marker per coordinate of `$coords` on `$chart` and return the series annotation.
///
/// Each shape gets its own `draw_series` call; `$size` is the half-size in pixels.
macro_rules! draw_markers {
    ($chart:expr, $coords:expr, $size:expr, $style:expr, $shape:expr) => {{
        use plotters::prelude::{Circle, EmptyElement, PathElement, Polygon, Rectangle};
        let s: i32 = $size;
        let st: plotters::style::ShapeStyle = $style;
        let coords = $coords;
        match $shape {
            $crate::models::MarkerShape::Circle => $chart.draw_series(
                coords.map(|c| EmptyElement::at(c) + Circle::new((0, 0), s, st.filled())),
            ),
            $crate::models::MarkerShape::Square => $chart.draw_series(coords.map(|c| {
                EmptyElement::at(c) + Rectangle::new([(-s, -s), (s, s)], st.filled())
            })),
            $crate::models::MarkerShape::Triangle => $chart.draw_series(coords.map(|c| {
                EmptyElement::at(c) + Polygon::new(vec![(0, -s), (-s, s), (s, s)], st.filled())
            })),
            $crate::models::MarkerShape::Diamond => $chart.draw_series(coords.map(|c| {
                EmptyElement::at(c)
                    + Polygon::new(vec![(0, -s), (-s, 0), (0, s), (s, 0)], st.filled())
            })),
            $crate::models::MarkerShape::Cross => $chart.draw_series(coords.map(|c| {
                EmptyElement::at(c)
                    + PathElement::new(vec![(-s, 0), (s, 0)], st.stroke_width(2))
                    + PathElement::new(vec![(0, -s), (0, s)], st.stroke_width(2))
            })),
            $crate::models::MarkerShape::X => $chart.draw_series(coords.map(|c| {
                EmptyElement::at(c)
                    + PathElement::new(vec![(-s, -s), (s, s)], st.stroke_width(2))
                    + PathElement::new(vec![(-s, s), (s, -s)], st.stroke_width(2))
            })),
        }
    }};
}

pub(crate) use draw_markers;
