//! The rendering surface: a retained figure made of subplots and the artists drawn in them.
//!
//! Plotters paints immediately, so renderers record what they want drawn here and the
//! figure is painted only when it is saved or shown (see [`crate::viz`]).

use crate::colormap::Rgb8;
use crate::config::FontChoice;
use crate::error::{PlotError, Result};
use crate::models::{LegendSpec, MarkerShape, SaveOptions};
use ndarray::Array2;
use std::ops::Range;
use std::path::Path;

/// Stroke/marker appearance of one artist.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistStyle {
    pub color: Rgb8,
    pub alpha: f64,
    pub marker: MarkerShape,
    pub marker_size: u32,
    pub line_width: u32,
}

impl ArtistStyle {
    pub fn new(color: Rgb8) -> Self {
        Self {
            color,
            alpha: 1.0,
            marker: MarkerShape::Circle,
            marker_size: 4,
            line_width: 2,
        }
    }
}

/// Horizontal placement of text relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Something drawn inside a subplot. Points carry three coordinates; 2D subplots ignore the third.
#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    Markers {
        points: Vec<[f64; 3]>,
        style: ArtistStyle,
        label: Option<String>,
    },
    Polyline {
        points: Vec<[f64; 3]>,
        style: ArtistStyle,
        label: Option<String>,
    },
    Text {
        at: [f64; 3],
        text: String,
        font_px: u32,
        align: TextAlign,
    },
}

impl Artist {
    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Markers { label, .. } | Artist::Polyline { label, .. } => label.as_deref(),
            Artist::Text { .. } => None,
        }
    }

    fn points(&self) -> &[[f64; 3]] {
        match self {
            Artist::Markers { points, .. } | Artist::Polyline { points, .. } => points,
            Artist::Text { at, .. } => std::slice::from_ref(at),
        }
    }
}

/// Projection of a subplot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Cartesian2d,
    /// View angles in degrees.
    Cartesian3d { elevation: f64, azimuth: f64 },
}

/// A single drawable region.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub projection: Projection,
    pub title: Option<(String, u32)>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub z_label: Option<String>,
    pub x_lim: Option<Range<f64>>,
    pub y_lim: Option<Range<f64>>,
    pub z_lim: Option<Range<f64>>,
    pub legend: Option<LegendSpec>,
    /// Draw the mesh, ticks and axis descriptions.
    pub axis_visible: bool,
    pub artists: Vec<Artist>,
}

impl Axes {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            title: None,
            x_label: None,
            y_label: None,
            z_label: None,
            x_lim: None,
            y_lim: None,
            z_lim: None,
            legend: None,
            axis_visible: true,
            artists: Vec::new(),
        }
    }

    pub fn is_3d(&self) -> bool {
        matches!(self.projection, Projection::Cartesian3d { .. })
    }

    pub fn scatter(&mut self, points: Vec<[f64; 3]>, style: ArtistStyle, label: Option<String>) {
        self.artists.push(Artist::Markers { points, style, label });
    }

    pub fn plot(&mut self, points: Vec<[f64; 3]>, style: ArtistStyle, label: Option<String>) {
        self.artists.push(Artist::Polyline { points, style, label });
    }

    pub fn text(&mut self, at: [f64; 3], text: impl Into<String>, font_px: u32, align: TextAlign) {
        self.artists.push(Artist::Text {
            at,
            text: text.into(),
            font_px,
            align,
        });
    }

    pub fn set_title(&mut self, title: impl Into<String>, font_px: u32) {
        self.title = Some((title.into(), font_px));
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.x_label = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.y_label = Some(label.into());
    }

    pub fn set_zlabel(&mut self, label: impl Into<String>) {
        self.z_label = Some(label.into());
    }

    pub fn set_xlim(&mut self, lim: Range<f64>) {
        self.x_lim = Some(lim);
    }

    pub fn set_ylim(&mut self, lim: Range<f64>) {
        self.y_lim = Some(lim);
    }

    pub fn set_zlim(&mut self, lim: Range<f64>) {
        self.z_lim = Some(lim);
    }

    pub fn set_legend(&mut self, legend: LegendSpec) {
        self.legend = Some(legend);
    }

    pub fn view_init(&mut self, elevation: f64, azimuth: f64) {
        if self.is_3d() {
            self.projection = Projection::Cartesian3d { elevation, azimuth };
        }
    }

    pub fn axis_off(&mut self) {
        self.axis_visible = false;
    }

    pub fn has_labels(&self) -> bool {
        self.artists.iter().any(|a| a.label().is_some())
    }

    /// Data range along coordinate `k`, explicit limits first, padded by 5%.
    pub fn data_range(&self, k: usize) -> Range<f64> {
        let explicit = match k {
            0 => &self.x_lim,
            1 => &self.y_lim,
            _ => &self.z_lim,
        };
        if let Some(lim) = explicit {
            return lim.clone();
        }
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in self.artists.iter().flat_map(|a| a.points()).map(|p| p[k]) {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if !min.is_finite() {
            return 0.0..1.0;
        }
        if (max - min).abs() < f64::EPSILON {
            return (min - 1.0)..(max + 1.0);
        }
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }
}

/// The drawable regions of a figure: one subplot, or a row-major matrix of them.
#[derive(Clone, Debug, PartialEq)]
pub enum AxesSet {
    Single(Axes),
    Grid(Array2<Axes>),
}

impl AxesSet {
    pub fn len(&self) -> usize {
        match self {
            AxesSet::Single(_) => 1,
            AxesSet::Grid(g) => g.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            AxesSet::Single(_) => (1, 1),
            AxesSet::Grid(g) => g.dim(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Axes> {
        match self {
            AxesSet::Single(ax) => (row == 0 && col == 0).then_some(ax),
            AxesSet::Grid(g) => g.get((row, col)),
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Axes> {
        match self {
            AxesSet::Single(ax) => (row == 0 && col == 0).then_some(ax),
            AxesSet::Grid(g) => g.get_mut((row, col)),
        }
    }

    /// The only subplot of a non-grid figure.
    pub fn single_mut(&mut self) -> Option<&mut Axes> {
        match self {
            AxesSet::Single(ax) => Some(ax),
            AxesSet::Grid(_) => None,
        }
    }

    /// Subplots in row-major order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Axes> + '_> {
        match self {
            AxesSet::Single(ax) => Box::new(std::iter::once(ax)),
            AxesSet::Grid(g) => Box::new(g.iter()),
        }
    }

    pub fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut Axes> + '_> {
        match self {
            AxesSet::Single(ax) => Box::new(std::iter::once(ax)),
            AxesSet::Grid(g) => Box::new(g.iter_mut()),
        }
    }
}

/// Top-level rendering surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    size: (u32, u32),
    font: FontChoice,
    tight_layout: bool,
    axes: Option<AxesSet>,
}

impl Figure {
    /// A blank surface without subplots.
    pub fn new(size: (u32, u32), font: FontChoice) -> Self {
        Self {
            size,
            font,
            tight_layout: false,
            axes: None,
        }
    }

    /// A surface with `rows x cols` subplots. More than one subplot, or `force_matrix`,
    /// yields a grid; a 3D figure always holds exactly one subplot.
    pub fn with_subplots(
        size: (u32, u32),
        font: FontChoice,
        rows: usize,
        cols: usize,
        plot_3d: bool,
        force_matrix: bool,
    ) -> Result<Self> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let projection = if plot_3d {
            if rows * cols > 1 {
                return Err(PlotError::Unsupported3dGrid { rows, cols });
            }
            Projection::Cartesian3d {
                elevation: 45.0,
                azimuth: 45.0,
            }
        } else {
            Projection::Cartesian2d
        };

        let axes = if rows > 1 || cols > 1 || force_matrix {
            AxesSet::Grid(Array2::from_shape_fn((rows, cols), |_| Axes::new(projection)))
        } else {
            AxesSet::Single(Axes::new(projection))
        };
        Ok(Self {
            axes: Some(axes),
            ..Self::new(size, font)
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn font(&self) -> FontChoice {
        self.font
    }

    pub fn tight_layout(&self) -> bool {
        self.tight_layout
    }

    pub fn set_tight_layout(&mut self, tight: bool) {
        self.tight_layout = tight;
    }

    pub fn axes(&self) -> Option<&AxesSet> {
        self.axes.as_ref()
    }

    pub fn axes_mut(&mut self) -> Option<&mut AxesSet> {
        self.axes.as_mut()
    }

    /// Paint to `path`: SVG for `.svg`, a bitmap format (by extension) otherwise.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        crate::viz::render_to_file(self, path.as_ref(), options)
    }

    /// Paint into an RGB buffer of `width * height * 3` bytes.
    pub fn to_rgb(&self) -> Result<Vec<u8>> {
        crate::viz::render_to_rgb(self, &SaveOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vs_grid() {
        let f = Figure::with_subplots((100, 100), FontChoice::Serif, 1, 1, false, false).unwrap();
        assert!(matches!(f.axes(), Some(AxesSet::Single(_))));

        let f = Figure::with_subplots((100, 100), FontChoice::Serif, 1, 1, false, true).unwrap();
        assert_eq!(f.axes().unwrap().shape(), (1, 1));
        assert!(matches!(f.axes(), Some(AxesSet::Grid(_))));

        let f = Figure::with_subplots((100, 100), FontChoice::Serif, 2, 3, false, false).unwrap();
        assert_eq!(f.axes().unwrap().len(), 6);
        assert!(f.axes().unwrap().get(1, 2).is_some());
        assert!(f.axes().unwrap().get(2, 0).is_none());
    }

    #[test]
    fn three_d_grid_is_rejected() {
        let e = Figure::with_subplots((100, 100), FontChoice::Serif, 2, 2, true, false);
        assert!(matches!(e, Err(PlotError::Unsupported3dGrid { rows: 2, cols: 2 })));
    }

    #[test]
    fn data_range_pads_and_handles_flat_data() {
        let mut ax = Axes::new(Projection::Cartesian2d);
        ax.scatter(vec![[0.0, 5.0, 0.0], [10.0, 5.0, 0.0]], ArtistStyle::new(Rgb8::BLACK), None);
        let x = ax.data_range(0);
        assert!((x.start + 0.5).abs() < 1e-9 && (x.end - 10.5).abs() < 1e-9);
        assert_eq!(ax.data_range(1), 4.0..6.0);
        ax.set_ylim(-1.0..1.0);
        assert_eq!(ax.data_range(1), -1.0..1.0);
    }
}
