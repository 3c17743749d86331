use crate::colormap::Rgb8;
use crate::error::{PlotError, Result};
use crate::figure::{ArtistStyle, Axes, TextAlign};
use crate::models::{Dataset, SeriesKind, SeriesOptions};
use crate::plot::{PlotContext, Renderer};

/// Scatter plots of the objective space.
///
/// One objective is drawn against the row index, two on a plane, three in a rotatable
/// 3D view and anything larger as an `n x n` pairwise matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter {
    /// 3D view angle `(elevation, azimuth)` in degrees.
    pub angle: (f64, f64),
    /// Default series kind for datasets that do not set one.
    pub kind: SeriesKind,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            angle: (45.0, 45.0),
            kind: SeriesKind::Scatter,
        }
    }
}

impl Scatter {
    pub fn with_angle(mut self, elevation: f64, azimuth: f64) -> Self {
        self.angle = (elevation, azimuth);
        self
    }

    pub fn with_kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }

    fn draw_series(&self, ax: &mut Axes, points: Vec<[f64; 3]>, color: Rgb8, options: &SeriesOptions) {
        let mut style = ArtistStyle::new(color);
        if let Some(alpha) = options.alpha {
            style.alpha = alpha;
        }
        if let Some(marker) = options.marker {
            style.marker = marker;
        }
        if let Some(size) = options.size {
            style.marker_size = size;
        }
        if let Some(width) = options.line_width {
            style.line_width = width;
        }
        let label = options.label.clone();
        match options.kind.unwrap_or(self.kind) {
            SeriesKind::Scatter => ax.scatter(points, style, label),
            SeriesKind::Line => ax.plot(points, style, label),
            SeriesKind::LinePoints => {
                ax.plot(points.clone(), style.clone(), label);
                ax.scatter(points, style, None);
            }
        }
    }
}

/// Points of `d` built from columns `(x, y, z)`; `None` for x means the row index.
fn project(d: &Dataset, x: Option<usize>, y: usize, z: Option<usize>) -> Vec<[f64; 3]> {
    d.values
        .rows()
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            [
                x.map_or(row as f64, |c| v[c]),
                v[y],
                z.map_or(0.0, |c| v[c]),
            ]
        })
        .collect()
}

impl Renderer for Scatter {
    fn render(&self, ctx: &mut PlotContext) -> Result<()> {
        let n_dim = ctx.n_dim().ok_or(PlotError::DimensionUnknown)?;
        let labels = ctx.labels()?;
        let series: Vec<(Dataset, Rgb8)> = ctx
            .datasets()
            .iter()
            .enumerate()
            .map(|(k, d)| (d.clone(), ctx.series_color(k, &d.options)))
            .collect();

        match n_dim {
            1 => {
                let axes = ctx.init_figure(1, 1, false, false)?;
                let ax = axes.single_mut().ok_or(PlotError::MissingAxes)?;
                for (d, color) in &series {
                    self.draw_series(ax, project(d, None, 0, None), *color, &d.options);
                }
                ax.set_xlabel("index");
                ax.set_ylabel(labels[0].clone());
            }
            2 => {
                let axes = ctx.init_figure(1, 1, false, false)?;
                let ax = axes.single_mut().ok_or(PlotError::MissingAxes)?;
                for (d, color) in &series {
                    self.draw_series(ax, project(d, Some(0), 1, None), *color, &d.options);
                }
                ax.set_xlabel(labels[0].clone());
                ax.set_ylabel(labels[1].clone());
            }
            3 => {
                let axes = ctx.init_figure(1, 1, true, false)?;
                let ax = axes.single_mut().ok_or(PlotError::MissingAxes)?;
                for (d, color) in &series {
                    self.draw_series(ax, project(d, Some(0), 1, Some(2)), *color, &d.options);
                }
                ax.set_xlabel(labels[0].clone());
                ax.set_ylabel(labels[1].clone());
                ax.set_zlabel(labels[2].clone());
                ax.view_init(self.angle.0, self.angle.1);
            }
            n => {
                let axes = ctx.init_figure(n, n, false, true)?;
                for i in 0..n {
                    for j in 0..n {
                        let ax = axes.get_mut(i, j).ok_or(PlotError::MissingAxes)?;
                        if i == j {
                            ax.set_xlim(0.0..1.0);
                            ax.set_ylim(0.0..1.0);
                            ax.text([0.5, 0.5, 0.0], labels[i].clone(), 20, TextAlign::Center);
                            ax.axis_off();
                        } else {
                            for (d, color) in &series {
                                self.draw_series(ax, project(d, Some(i), j, None), *color, &d.options);
                            }
                        }
                    }
                }
            }
        }
        log::debug!("scatter laid out {} dataset(s) over {n_dim} objective(s)", series.len());
        Ok(())
    }
}
