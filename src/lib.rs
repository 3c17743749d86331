//! moo_viz
//!
//! Plotting for multi-objective optimization results: queue objective matrices,
//! pick a visualization and save or show the figure. Pairs with the `moo-viz` CLI.
//!
//! ### Features
//! - Deferred rendering: datasets are validated and laid out on the first `save`/`show`
//! - Scatter plots in 1D, 2D, 3D and as a pairwise matrix for more objectives
//! - Parallel coordinate plots with normalized axes
//! - SVG/PNG output via plotters, and a native viewer window
//!
//! ### Example
//! ```no_run
//! use moo_viz::{Plot, PlotConfig, SeriesOptions, TitleSpec};
//! use moo_viz::renderers::Pcp;
//! use ndarray::array;
//!
//! let config = PlotConfig::default().with_title(TitleSpec::single("Pareto front"));
//! let mut plot = Plot::new(config, Pcp::default())?;
//! plot.add(array![[1.0, 3.0, 2.0], [2.0, 1.0, 3.0]], SeriesOptions::new().label("NSGA-II"));
//! plot.save("front.png", Default::default())?;
//! println!("{:?}", plot.labels()?);
//! # Ok::<(), moo_viz::PlotError>(())
//! ```

pub mod colormap;
pub mod config;
pub mod display;
pub mod error;
pub mod figure;
pub mod format;
pub mod models;
pub mod plot;
pub mod renderers;
pub mod storage;
pub mod viewer;
pub mod viz;

pub use colormap::{Colormap, ColormapSpec, Rgb8};
pub use config::{FontChoice, PlotConfig};
pub use display::Backend;
pub use error::{PlotError, Result};
pub use figure::{Axes, AxesSet, Figure};
pub use format::NumberFormatter;
pub use models::{
    AxisLabels, AxisStyle, BBox, Bounds, Dataset, LegendPosition, LegendSpec, MarkerShape,
    SaveOptions, SeriesKind, SeriesOptions, ShowOptions, Title, TitleSpec,
};
pub use plot::{Plot, PlotContext, Renderer};
