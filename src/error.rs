//! Error type shared by the plotting core, the renderers and the figure painter.

use thiserror::Error;

/// Everything that can go wrong while building or painting a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// `draw` was called before any dataset was added.
    #[error("no elements to plot were added yet")]
    NoData,

    /// Every pending dataset has zero columns.
    #[error("the added inputs have no objectives (zero columns)")]
    NoObjectives,

    /// Pending datasets disagree on their number of columns (sorted, distinct).
    #[error("inputs with different dimensions were added: {0:?}")]
    DimensionMismatch(Vec<usize>),

    #[error("number of axis labels ({got}) not equal to the number of axes ({expected})")]
    LabelCountMismatch { expected: usize, got: usize },

    #[error("number of titles ({got}) not equal to the number of subplots ({expected})")]
    TitleCountMismatch { expected: usize, got: usize },

    /// Labels were requested before the datasets were validated.
    #[error("the number of objectives is unknown until the plot has been drawn")]
    DimensionUnknown,

    #[error("arrays of rank {0} cannot be plotted, expected a vector, a matrix or a stack of matrices")]
    UnsupportedRank(usize),

    #[error("a 3D figure holds a single subplot, got a {rows}x{cols} grid")]
    Unsupported3dGrid { rows: usize, cols: usize },

    /// The renderer returned without creating any subplot.
    #[error("the renderer did not create any subplot")]
    MissingAxes,

    #[error("unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("viewer failed: {0}")]
    Viewer(String),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Plotters reports backend failures through `Debug`-only error kinds.
pub(crate) fn render_err<E: std::fmt::Debug>(e: E) -> PlotError {
    PlotError::Render(format!("{e:?}"))
}
