//! Plot configuration. Every field has a default; JSON files may set any subset.

use crate::colormap::{ColormapSpec, Rgb8};
use crate::display::Backend;
use crate::format::NumberFormatter;
use crate::models::{AxisLabels, AxisStyle, Bounds, LegendSpec, TitleSpec};
use anyhow::Context;
use plotters::style::{FontDesc, FontFamily, IntoFont};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Font family used for every text element of a figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontChoice {
    #[default]
    Serif,
    SansSerif,
}

impl FontChoice {
    pub fn family(self) -> FontFamily<'static> {
        match self {
            FontChoice::Serif => FontFamily::Serif,
            FontChoice::SansSerif => FontFamily::SansSerif,
        }
    }

    pub fn font(self, px: u32) -> FontDesc<'static> {
        (self.family(), f64::from(px)).into_font()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure size in pixels (width, height).
    pub fig_size: (u32, u32),
    pub title: Option<TitleSpec>,
    pub legend: LegendSpec,
    pub tight_layout: bool,
    /// Normalization bounds used by renderers that scale objectives.
    pub bounds: Option<Bounds>,
    /// Flip normalized values (`v -> 1 - v`).
    pub reverse: bool,
    pub cmap: ColormapSpec,
    pub axis_style: AxisStyle,
    pub axis_labels: AxisLabels,
    pub font: FontChoice,
    /// Forces the display backend instead of detecting it.
    pub backend: Option<Backend>,
    #[serde(skip)]
    pub number_to_text: NumberFormatter,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            fig_size: (800, 600),
            title: None,
            legend: LegendSpec::default(),
            tight_layout: false,
            bounds: None,
            reverse: false,
            cmap: ColormapSpec::default(),
            axis_style: AxisStyle::default(),
            axis_labels: AxisLabels::default(),
            font: FontChoice::default(),
            backend: None,
            number_to_text: NumberFormatter::default(),
        }
    }
}

impl PlotConfig {
    /// Load a JSON configuration file; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
    }

    pub fn with_fig_size(mut self, width: u32, height: u32) -> Self {
        self.fig_size = (width, height);
        self
    }

    pub fn with_title(mut self, title: TitleSpec) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_legend(mut self, legend: LegendSpec) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_tight_layout(mut self, tight: bool) -> Self {
        self.tight_layout = tight;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_cmap_name(mut self, name: impl Into<String>) -> Self {
        self.cmap = ColormapSpec::Name(name.into());
        self
    }

    pub fn with_colors(mut self, colors: Vec<Rgb8>) -> Self {
        self.cmap = ColormapSpec::Colors(colors);
        self
    }

    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.axis_style = style;
        self
    }

    pub fn with_axis_labels(mut self, labels: AxisLabels) -> Self {
        self.axis_labels = labels;
        self
    }

    pub fn with_font(mut self, font: FontChoice) -> Self {
        self.font = font;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_number_to_text(mut self, f: NumberFormatter) -> Self {
        self.number_to_text = f;
        self
    }
}
