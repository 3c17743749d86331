//! The plot builder: accumulates datasets, validates them and hands them to a [`Renderer`].
//!
//! Rendering is deferred. Datasets are only checked and laid out when the plot is drawn,
//! which happens implicitly on the first [`Plot::save`] or [`Plot::show`].
//!
//! ```no_run
//! use moo_viz::{Plot, PlotConfig, SeriesOptions};
//! use moo_viz::renderers::Scatter;
//! use ndarray::array;
//!
//! let mut plot = Plot::new(PlotConfig::default(), Scatter::default())?;
//! plot.add(array![[1.0, 4.0], [2.0, 2.0], [4.0, 1.0]], SeriesOptions::new().label("front"));
//! plot.save("front.svg", Default::default())?;
//! # Ok::<(), moo_viz::PlotError>(())
//! ```

use crate::colormap::{Colormap, Rgb8};
use crate::config::PlotConfig;
use crate::display;
use crate::error::{PlotError, Result};
use crate::figure::{AxesSet, Figure};
use crate::models::{AxisLabels, BBox, Dataset, SaveOptions, SeriesOptions, ShowOptions, StyleValue, Title};
use ndarray::{Array1, Array2, Array3, ArrayD, Axis, Ix1, Ix2, Ix3};
use std::collections::BTreeSet;
use std::path::Path;

/// A concrete visualization. Called by [`Plot::draw`] once the datasets have been validated;
/// it creates the figure through [`PlotContext::init_figure`] and records what to draw.
pub trait Renderer {
    fn render(&self, ctx: &mut PlotContext) -> Result<()>;
}

impl<F> Renderer for F
where
    F: Fn(&mut PlotContext) -> Result<()>,
{
    fn render(&self, ctx: &mut PlotContext) -> Result<()> {
        self(ctx)
    }
}

/// Everything a renderer can see and touch: configuration, datasets and the figure.
#[derive(Debug)]
pub struct PlotContext {
    config: PlotConfig,
    colormap: Colormap,
    datasets: Vec<Dataset>,
    n_dim: Option<usize>,
    figure: Option<Figure>,
}

impl PlotContext {
    fn new(config: PlotConfig) -> Result<Self> {
        let colormap = Colormap::from_spec(&config.cmap)?;
        Ok(Self {
            config,
            colormap,
            datasets: Vec::new(),
            n_dim: None,
            figure: None,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Number of objectives, known once the datasets have been validated.
    pub fn n_dim(&self) -> Option<usize> {
        self.n_dim
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    pub fn axes(&self) -> Option<&AxesSet> {
        self.figure.as_ref()?.axes()
    }

    pub fn axes_mut(&mut self) -> Option<&mut AxesSet> {
        self.figure.as_mut()?.axes_mut()
    }

    /// Replace the figure with a new one holding `rows x cols` subplots.
    pub fn init_figure(
        &mut self,
        rows: usize,
        cols: usize,
        plot_3d: bool,
        force_matrix: bool,
    ) -> Result<&mut AxesSet> {
        let figure = Figure::with_subplots(
            self.config.fig_size,
            self.config.font,
            rows,
            cols,
            plot_3d,
            force_matrix,
        )?;
        log::debug!("initialised a {rows}x{cols} figure (3d: {plot_3d})");
        self.figure
            .insert(figure)
            .axes_mut()
            .ok_or(PlotError::MissingAxes)
    }

    /// Axis labels, one per objective.
    ///
    /// An explicit list must match the number of objectives; a symbol `s` yields
    /// `$s_1$`, `$s_2$`, ... `$s_n$`.
    pub fn labels(&self) -> Result<Vec<String>> {
        let n_dim = self.n_dim.ok_or(PlotError::DimensionUnknown)?;
        match &self.config.axis_labels {
            AxisLabels::Explicit(labels) if labels.len() != n_dim => {
                Err(PlotError::LabelCountMismatch {
                    expected: n_dim,
                    got: labels.len(),
                })
            }
            AxisLabels::Explicit(labels) => Ok(labels.clone()),
            AxisLabels::Symbol(symbol) => Ok((1..=n_dim).map(|i| format!("${symbol}_{i}$")).collect()),
        }
    }

    /// Color of dataset `k`: its own option, else the colormap entry.
    pub fn series_color(&self, k: usize, options: &SeriesOptions) -> Rgb8 {
        options
            .color
            .unwrap_or_else(|| self.colormap.color(k, self.datasets.len()))
    }

    fn validate(&mut self) -> Result<usize> {
        if self.datasets.is_empty() {
            return Err(PlotError::NoData);
        }
        let dims: BTreeSet<usize> = self.datasets.iter().map(Dataset::n_dim).collect();
        if dims.len() > 1 {
            return Err(PlotError::DimensionMismatch(dims.into_iter().collect()));
        }
        let n_dim = self.datasets[0].n_dim();
        if n_dim == 0 {
            return Err(PlotError::NoObjectives);
        }
        self.n_dim = Some(n_dim);
        Ok(n_dim)
    }

    fn push(&mut self, values: Array2<f64>, options: SeriesOptions) {
        self.datasets.push(Dataset::new(values, options));
    }
}

/// Stateful plot builder wrapping a [`Renderer`].
#[derive(Debug)]
pub struct Plot<R> {
    renderer: R,
    ctx: PlotContext,
}

impl<R: Renderer> Plot<R> {
    /// Fails when the configured colormap cannot be resolved.
    pub fn new(config: PlotConfig, renderer: R) -> Result<Self> {
        Ok(Self {
            renderer,
            ctx: PlotContext::new(config)?,
        })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn context(&self) -> &PlotContext {
        &self.ctx
    }

    pub fn config(&self) -> &PlotConfig {
        &self.ctx.config
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.ctx.datasets
    }

    pub fn n_dim(&self) -> Option<usize> {
        self.ctx.n_dim
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.ctx.figure()
    }

    /// The drawable region(s), absent until the plot has been drawn.
    pub fn axes(&self) -> Option<&AxesSet> {
        self.ctx.axes()
    }

    pub fn init_figure(
        &mut self,
        rows: usize,
        cols: usize,
        plot_3d: bool,
        force_matrix: bool,
    ) -> Result<&mut AxesSet> {
        self.ctx.init_figure(rows, cols, plot_3d, force_matrix)
    }

    /// Queue one dataset (rows = points, columns = objectives).
    pub fn add(&mut self, values: Array2<f64>, options: SeriesOptions) -> &mut Self {
        self.ctx.push(values, options);
        self
    }

    /// Queue a single point.
    pub fn add_row(&mut self, values: Array1<f64>, options: SeriesOptions) -> &mut Self {
        self.ctx.push(values.insert_axis(Axis(0)), options);
        self
    }

    /// Queue every matrix of a stack as its own dataset, each with a copy of `options`.
    pub fn add_stack(&mut self, values: Array3<f64>, options: SeriesOptions) -> &mut Self {
        for matrix in values.outer_iter() {
            self.ctx.push(matrix.to_owned(), options.clone());
        }
        self
    }

    /// Queue an array of any supported rank (1, 2 or 3). `None` is a no-op.
    pub fn add_array(
        &mut self,
        values: impl Into<Option<ArrayD<f64>>>,
        options: SeriesOptions,
    ) -> Result<&mut Self> {
        let Some(values) = values.into() else {
            return Ok(self);
        };
        match values.ndim() {
            1 => Ok(self.add_row(values.into_dimensionality::<Ix1>()?, options)),
            2 => Ok(self.add(values.into_dimensionality::<Ix2>()?, options)),
            3 => Ok(self.add_stack(values.into_dimensionality::<Ix3>()?, options)),
            rank => Err(PlotError::UnsupportedRank(rank)),
        }
    }

    /// Validate the pending datasets, record their dimensionality and run the renderer.
    pub fn draw(&mut self) -> Result<&mut Self> {
        let n_dim = self.ctx.validate()?;
        log::debug!(
            "drawing {} dataset(s) with {n_dim} objective(s)",
            self.ctx.datasets.len()
        );
        self.renderer.render(&mut self.ctx)?;
        Ok(self)
    }

    /// Run `visitor` on the current drawable region(s).
    pub fn apply<F>(&mut self, visitor: F) -> &mut Self
    where
        F: FnOnce(Option<&mut AxesSet>),
    {
        visitor(self.ctx.axes_mut());
        self
    }

    /// Merge key/value pairs into the persistent axis style.
    pub fn set_axis_style<I, K, V>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StyleValue>,
    {
        self.ctx.config.axis_style.merge(options);
        self
    }

    /// Discard the subplots and start over from a blank figure.
    pub fn reset(&mut self) -> &mut Self {
        self.ctx.figure = Some(Figure::new(self.ctx.config.fig_size, self.ctx.config.font));
        self
    }

    /// Draw unless subplots already exist, then apply legend, titles and layout settings.
    ///
    /// On failure the subplots are discarded so that the next call draws again.
    pub fn plot_if_not_done_yet(&mut self) -> Result<&mut Self> {
        if self.ctx.axes().is_some() {
            return Ok(self);
        }
        let outcome = self.draw().map(|_| ());
        if let Err(e) = outcome.and_then(|()| self.decorate()) {
            if self.ctx.axes().is_some() {
                self.reset();
            }
            return Err(e);
        }
        Ok(self)
    }

    fn decorate(&mut self) -> Result<()> {
        let legend = self.ctx.config.legend.clone();
        let title = self.ctx.config.title.clone();
        let tight_layout = self.ctx.config.tight_layout;

        let figure = self.ctx.figure.as_mut().ok_or(PlotError::MissingAxes)?;
        figure.set_tight_layout(tight_layout);
        let axes = figure.axes_mut().ok_or(PlotError::MissingAxes)?;

        if let Some(spec) = &title
            && let Title::PerAxes(titles) = &spec.text
            && titles.len() != axes.len()
        {
            return Err(PlotError::TitleCountMismatch {
                expected: axes.len(),
                got: titles.len(),
            });
        }

        for (i, ax) in axes.iter_mut().enumerate() {
            if legend.enabled {
                ax.set_legend(legend.clone());
            }
            if let Some(spec) = &title {
                match &spec.text {
                    Title::Single(text) if !text.is_empty() => ax.set_title(text.clone(), spec.font_px),
                    Title::Single(_) => {}
                    Title::PerAxes(texts) => ax.set_title(texts[i].clone(), spec.font_px),
                }
            }
        }
        Ok(())
    }

    /// Draw if needed, then open a window unless inside a notebook or on a headless backend.
    pub fn show(&mut self, options: &ShowOptions) -> Result<&mut Self> {
        self.plot_if_not_done_yet()?;

        let backend = self.ctx.config.backend.unwrap_or_else(display::detect_backend);
        if display::in_notebook() || !backend.is_interactive() {
            log::info!("not opening a window (notebook or {backend:?} backend)");
            return Ok(self);
        }
        let figure = self.ctx.figure.clone().ok_or(PlotError::MissingAxes)?;
        crate::viewer::show_figure(figure, options)?;
        Ok(self)
    }

    /// Draw if needed, then write the figure to `path`. `bbox` defaults to [`BBox::Tight`].
    pub fn save<P: AsRef<Path>>(&mut self, path: P, mut options: SaveOptions) -> Result<&mut Self> {
        self.plot_if_not_done_yet()?;
        options.bbox.get_or_insert(BBox::Tight);
        let figure = self.ctx.figure.as_ref().ok_or(PlotError::MissingAxes)?;
        figure.save(path, &options)?;
        Ok(self)
    }

    /// Axis labels, see [`PlotContext::labels`].
    pub fn labels(&self) -> Result<Vec<String>> {
        self.ctx.labels()
    }
}
