//! Concrete visualizations implementing [`crate::Renderer`].

mod pcp;
mod scatter;

pub use pcp::Pcp;
pub use scatter::Scatter;

use crate::models::{Bounds, Dataset};
use ndarray::Array2;

/// Range `(lo, hi)` used to normalize each objective.
///
/// Bounds, when given, decide the range of each objective; otherwise the observed
/// min/max over all datasets is used, per objective (`each_axis`) or globally.
pub(crate) fn ranges(datasets: &[Dataset], bounds: Option<&Bounds>, each_axis: bool) -> Vec<(f64, f64)> {
    let n_dim = datasets.first().map_or(0, Dataset::n_dim);
    match bounds {
        Some(b) => (0..n_dim)
            .map(|i| b.for_axis(i).unwrap_or_else(|| observed_range(datasets, Some(i))))
            .collect(),
        None if each_axis => (0..n_dim).map(|i| observed_range(datasets, Some(i))).collect(),
        None => vec![observed_range(datasets, None); n_dim],
    }
}

/// Scale every dataset into `[0, 1]` with one `(lo, hi)` range per objective.
/// Objectives with a zero-width range map to 0. `reverse` flips the result.
pub(crate) fn normalize(datasets: &[Dataset], ranges: &[(f64, f64)], reverse: bool) -> Vec<Array2<f64>> {
    datasets
        .iter()
        .map(|d| {
            let mut out = d.values.clone();
            for (mut col, &(lo, hi)) in out.columns_mut().into_iter().zip(ranges) {
                let width = hi - lo;
                col.mapv_inplace(|v| {
                    let t = if width.abs() > f64::EPSILON { (v - lo) / width } else { 0.0 };
                    if reverse { 1.0 - t } else { t }
                });
            }
            out
        })
        .collect()
}

/// Min/max of column `col` (or of every value) across all datasets, ignoring non-finite values.
fn observed_range(datasets: &[Dataset], col: Option<usize>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for d in datasets {
        let visit = |v: &f64| {
            if v.is_finite() {
                lo = lo.min(*v);
                hi = hi.max(*v);
            }
        };
        match col {
            Some(i) => d.values.column(i).iter().for_each(visit),
            None => d.values.iter().for_each(visit),
        }
    }
    if lo.is_finite() { (lo, hi) } else { (0.0, 0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesOptions;
    use ndarray::array;

    fn data() -> Vec<Dataset> {
        vec![
            Dataset::new(array![[0.0, 10.0], [2.0, 10.0]], SeriesOptions::new()),
            Dataset::new(array![[4.0, 10.0]], SeriesOptions::new()),
        ]
    }

    #[test]
    fn per_axis_range_and_zero_width() {
        let d = data();
        let n = normalize(&d, &ranges(&d, None, true), false);
        assert_eq!(n[0], array![[0.0, 0.0], [0.5, 0.0]]);
        assert_eq!(n[1], array![[1.0, 0.0]]);
    }

    #[test]
    fn global_range_and_reverse() {
        let d = data();
        assert_eq!(ranges(&d, None, false), [(0.0, 10.0), (0.0, 10.0)]);
        let n = normalize(&d, &ranges(&d, None, false), true);
        let expected = array![[1.0, 0.0], [0.8, 0.0]];
        assert!(n[0].iter().zip(&expected).all(|(a, b)| (a - b).abs() < 1e-12));
    }

    #[test]
    fn single_bound_broadcasts() {
        let b = Bounds::uniform(0.0, 20.0);
        let d = data();
        let n = normalize(&d, &ranges(&d, Some(&b), true), false);
        assert_eq!(n[1], array![[0.2, 0.5]]);
    }
}
