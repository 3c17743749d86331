use crate::colormap::Rgb8;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker shape for data points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
    X,
}

/// How the rows of a dataset are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    /// Markers only.
    #[default]
    Scatter,
    /// Rows connected by a line.
    Line,
    /// Line + markers overlay.
    LinePoints,
}

/// Per-dataset style options. Unset fields fall back to the renderer's defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub label: Option<String>,
    pub color: Option<Rgb8>,
    pub marker: Option<MarkerShape>,
    pub size: Option<u32>,
    pub alpha: Option<f64>,
    pub line_width: Option<u32>,
    pub kind: Option<SeriesKind>,
}

impl SeriesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: Rgb8) -> Self {
        self.color = Some(color);
        self
    }

    pub fn marker(mut self, marker: MarkerShape) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn line_width(mut self, width: u32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn kind(mut self, kind: SeriesKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// One queued dataset: rows are points, columns are objectives.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub values: Array2<f64>,
    pub options: SeriesOptions,
}

impl Dataset {
    pub fn new(values: Array2<f64>, options: SeriesOptions) -> Self {
        Self { values, options }
    }

    /// Number of objectives (columns).
    pub fn n_dim(&self) -> usize {
        self.values.ncols()
    }
}

/// Figure title: one text for every subplot, or one per subplot in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Single(String),
    PerAxes(Vec<String>),
}

fn default_title_font_px() -> u32 {
    18
}

/// A title together with its text options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TitleSpec {
    pub text: Title,
    #[serde(default = "default_title_font_px")]
    pub font_px: u32,
}

impl TitleSpec {
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: Title::Single(text.into()),
            font_px: default_title_font_px(),
        }
    }

    pub fn per_axes<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: Title::PerAxes(texts.into_iter().map(Into::into).collect()),
            font_px: default_title_font_px(),
        }
    }
}

/// Legend placement inside a subplot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Whether and how a legend is drawn in each subplot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendSpec {
    pub enabled: bool,
    pub position: LegendPosition,
    pub font_px: u32,
}

impl Default for LegendSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            position: LegendPosition::default(),
            font_px: 14,
        }
    }
}

impl LegendSpec {
    pub fn shown() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// Axis labels: a symbol indexed per objective (`$f_1$`, `$f_2$`, ...) or an explicit list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisLabels {
    Explicit(Vec<String>),
    Symbol(String),
}

impl Default for AxisLabels {
    fn default() -> Self {
        AxisLabels::Symbol("f".into())
    }
}

/// Normalization bounds per objective. A single entry applies to every objective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    pub fn uniform(lower: f64, upper: f64) -> Self {
        Self::new(vec![lower], vec![upper])
    }

    /// Bounds of objective `i`, broadcasting single-entry vectors.
    pub fn for_axis(&self, i: usize) -> Option<(f64, f64)> {
        let pick = |v: &[f64]| match v.len() {
            1 => v.first().copied(),
            _ => v.get(i).copied(),
        };
        Some((pick(&self.lower)?, pick(&self.upper)?))
    }
}

/// A loosely-typed axis style value (`"red"`, `0.75`, `true`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Flag(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

/// Persistent key/value style for axis lines (`color`, `linewidth`, `alpha`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisStyle(BTreeMap<String, StyleValue>);

impl AxisStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Merge `other` into `self`; keys present in both take `other`'s value.
    pub fn merge<I, K, V>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StyleValue>,
    {
        for (k, v) in other {
            self.0.insert(k.into(), v.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            StyleValue::Number(v) => Some(*v),
            StyleValue::Text(s) => s.parse().ok(),
            StyleValue::Flag(_) => None,
        }
    }

    pub fn color(&self, key: &str) -> Option<Rgb8> {
        match self.0.get(key)? {
            StyleValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }
}

/// Bounding box treatment when saving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BBox {
    /// No outer padding around the subplots.
    Tight,
    /// Keep a padding band around the subplots.
    Standard,
}

/// Options for [`crate::Plot::save`]. `bbox` defaults to [`BBox::Tight`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    pub bbox: Option<BBox>,
    pub background: Option<Rgb8>,
}

/// Options for [`crate::Plot::show`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowOptions {
    pub window_title: String,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            window_title: "moo-viz".into(),
        }
    }
}
