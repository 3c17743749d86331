use super::{normalize, ranges};
use crate::colormap::Rgb8;
use crate::error::{PlotError, Result};
use crate::figure::{ArtistStyle, TextAlign};
use crate::plot::{PlotContext, Renderer};

const AXIS_COLOR: Rgb8 = Rgb8::new(255, 0, 0);
const AXIS_WIDTH: f64 = 2.0;
const AXIS_ALPHA: f64 = 0.75;

/// Parallel coordinate plot: one vertical axis per objective, one polyline per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Pcp {
    /// Print the lower/upper value at the ends of each axis.
    pub show_bounds: bool,
    /// Normalize each objective by its own range instead of the global one.
    pub normalize_each_axis: bool,
}

impl Default for Pcp {
    fn default() -> Self {
        Self {
            show_bounds: true,
            normalize_each_axis: true,
        }
    }
}

impl Pcp {
    pub fn with_show_bounds(mut self, show: bool) -> Self {
        self.show_bounds = show;
        self
    }

    pub fn with_normalize_each_axis(mut self, each: bool) -> Self {
        self.normalize_each_axis = each;
        self
    }
}

impl Renderer for Pcp {
    fn render(&self, ctx: &mut PlotContext) -> Result<()> {
        let n_dim = ctx.n_dim().ok_or(PlotError::DimensionUnknown)?;
        let labels = ctx.labels()?;
        let config = ctx.config();
        let axis_ranges = ranges(ctx.datasets(), config.bounds.as_ref(), self.normalize_each_axis);
        let normalized = normalize(ctx.datasets(), &axis_ranges, config.reverse);

        let mut axis_style = ArtistStyle::new(config.axis_style.color("color").unwrap_or(AXIS_COLOR));
        axis_style.line_width = config.axis_style.number("linewidth").unwrap_or(AXIS_WIDTH).round().max(1.0) as u32;
        axis_style.alpha = config.axis_style.number("alpha").unwrap_or(AXIS_ALPHA);

        let bound_texts: Vec<(String, String)> = axis_ranges
            .iter()
            .map(|&(lo, hi)| {
                let (bottom, top) = if config.reverse { (hi, lo) } else { (lo, hi) };
                (config.number_to_text.format(bottom), config.number_to_text.format(top))
            })
            .collect();

        let polylines: Vec<(Vec<Vec<[f64; 3]>>, ArtistStyle, Option<String>)> = ctx
            .datasets()
            .iter()
            .zip(&normalized)
            .enumerate()
            .map(|(k, (d, values))| {
                let mut style = ArtistStyle::new(ctx.series_color(k, &d.options));
                if let Some(alpha) = d.options.alpha {
                    style.alpha = alpha;
                }
                if let Some(width) = d.options.line_width {
                    style.line_width = width;
                }
                let lines = values
                    .rows()
                    .into_iter()
                    .map(|row| row.iter().enumerate().map(|(i, &v)| [i as f64, v, 0.0]).collect())
                    .collect();
                (lines, style, d.options.label.clone())
            })
            .collect();

        let axes = ctx.init_figure(1, 1, false, false)?;
        let ax = axes.single_mut().ok_or(PlotError::MissingAxes)?;

        for (lines, style, mut label) in polylines {
            for line in lines {
                // only the first polyline of a dataset shows up in the legend
                ax.plot(line, style.clone(), label.take());
            }
        }

        for (i, name) in labels.iter().enumerate() {
            let x = i as f64;
            ax.plot(vec![[x, 0.0, 0.0], [x, 1.0, 0.0]], axis_style.clone(), None);
            if self.show_bounds {
                let (bottom, top) = &bound_texts[i];
                ax.text([x, 1.06, 0.0], top.clone(), 12, TextAlign::Center);
                ax.text([x, -0.06, 0.0], bottom.clone(), 12, TextAlign::Center);
            }
            ax.text([x, -0.15, 0.0], name.clone(), 14, TextAlign::Center);
        }

        let span = n_dim.saturating_sub(1) as f64;
        ax.set_xlim(-0.25..span + 0.25);
        ax.set_ylim(-0.2..1.2);
        ax.axis_off();
        log::debug!("pcp laid out {n_dim} axes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::figure::Artist;
    use crate::models::{AxisStyle, Bounds, SeriesOptions};
    use crate::plot::Plot;
    use ndarray::array;

    fn texts(plot: &Plot<Pcp>) -> Vec<String> {
        plot.axes()
            .unwrap()
            .get(0, 0)
            .unwrap()
            .artists
            .iter()
            .filter_map(|a| match a {
                Artist::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_polyline_per_row_with_a_single_label() {
        let mut plot = Plot::new(PlotConfig::default(), Pcp::default()).unwrap();
        plot.add(array![[0.0, 5.0, 1.0], [1.0, 0.0, 2.0]], SeriesOptions::new().label("A"));
        plot.draw().unwrap();

        let ax = plot.axes().unwrap().get(0, 0).unwrap();
        let lines: Vec<_> = ax
            .artists
            .iter()
            .filter(|a| matches!(a, Artist::Polyline { points, .. } if points.len() == 3))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label(), Some("A"));
        assert_eq!(lines[1].label(), None);
        assert!(matches!(lines[1], Artist::Polyline { points, .. } if points[1] == [1.0, 0.0, 0.0]));
        assert!(!ax.axis_visible);
        assert_eq!(ax.y_lim, Some(-0.2..1.2));
    }

    #[test]
    fn axis_style_and_bound_labels() {
        let mut style = AxisStyle::new();
        style.set("color", "blue").set("linewidth", 3.0);
        let config = PlotConfig::default()
            .with_axis_style(style)
            .with_bounds(Bounds::uniform(0.0, 2000.0));
        let mut plot = Plot::new(config, Pcp::default()).unwrap();
        plot.add(array![[1.0, 2.0]], SeriesOptions::new());
        plot.draw().unwrap();

        let ax = plot.axes().unwrap().get(0, 0).unwrap();
        let axis = ax
            .artists
            .iter()
            .find_map(|a| match a {
                Artist::Polyline { points, style, .. } if points[0][0] == points[1][0] => Some(style),
                _ => None,
            })
            .unwrap();
        assert_eq!(axis.color, Rgb8::new(0, 0, 255));
        assert_eq!(axis.line_width, 3);
        assert_eq!(axis.alpha, 0.75);
        let texts = texts(&plot);
        assert!(texts.contains(&"2.00e3".to_string()));
        assert!(texts.contains(&"0.00".to_string()));
        assert!(texts.contains(&"$f_2$".to_string()));
    }

    #[test]
    fn global_normalization_prints_the_shared_range() {
        let pcp = Pcp::default().with_normalize_each_axis(false);
        let mut plot = Plot::new(PlotConfig::default(), pcp).unwrap();
        plot.add(array![[0.0, 100.0], [1.0, 200.0]], SeriesOptions::new());
        plot.draw().unwrap();

        let texts = texts(&plot);
        assert_eq!(texts.iter().filter(|t| *t == "0.00").count(), 2);
        assert_eq!(texts.iter().filter(|t| *t == "200.00").count(), 2);
        assert!(!texts.contains(&"1.00".to_string()));

        let ax = plot.axes().unwrap().get(0, 0).unwrap();
        match &ax.artists[0] {
            Artist::Polyline { points, .. } => {
                assert_eq!(points, &vec![[0.0, 0.0, 0.0], [1.0, 0.5, 0.0]]);
            }
            other => panic!("unexpected artist: {other:?}"),
        }
    }

    #[test]
    fn bounds_can_be_hidden() {
        let mut plot = Plot::new(PlotConfig::default(), Pcp::default().with_show_bounds(false)).unwrap();
        plot.add(array![[1.0, 2.0]], SeriesOptions::new());
        plot.draw().unwrap();
        assert_eq!(texts(&plot), ["$f_1$", "$f_2$"]);
    }
}
