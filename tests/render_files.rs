use moo_viz::renderers::{Pcp, Scatter};
use moo_viz::{
    BBox, Backend, FontChoice, LegendSpec, MarkerShape, Plot, PlotConfig, Renderer, Rgb8,
    SaveOptions, SeriesKind, SeriesOptions, TitleSpec,
};
use ndarray::{Array, Array2, array};
use std::fs;
use std::path::Path;

fn front(n_dim: usize) -> Array2<f64> {
    Array::from_shape_fn((12, n_dim), |(r, c)| ((r + 1) * (c + 2)) as f64 / 7.0)
}

fn config() -> PlotConfig {
    PlotConfig::default()
        .with_backend(Backend::Headless)
        .with_legend(LegendSpec::shown())
        .with_title(TitleSpec::single("Pareto front"))
}

fn render<R: Renderer>(renderer: R, config: PlotConfig, data: &[Array2<f64>], path: &Path) {
    let mut plot = Plot::new(config, renderer).unwrap();
    for (i, d) in data.iter().enumerate() {
        plot.add(d.clone(), SeriesOptions::new().label(format!("run {i}")));
    }
    plot.save(path, SaveOptions::default()).unwrap();
}

fn assert_svg(path: &Path) {
    let s = fs::read_to_string(path).expect("svg written");
    assert!(s.contains("<svg"), "SVG should contain <svg tag");
    assert!(s.len() > 500, "SVG should have some content");
}

#[test]
fn scatter_2d_and_3d_svg() {
    let dir = tempfile::tempdir().unwrap();
    let p2 = dir.path().join("front2.svg");
    render(Scatter::default(), config(), &[front(2), front(2) * 1.5], &p2);
    assert_svg(&p2);
    assert!(fs::read_to_string(&p2).unwrap().contains("f₁"));

    let p3 = dir.path().join("front3.svg");
    render(Scatter::default().with_angle(20.0, 120.0), config(), &[front(3)], &p3);
    assert_svg(&p3);
}

#[test]
fn every_marker_shape_renders_in_2d_and_3d() {
    let shapes = [
        MarkerShape::Circle,
        MarkerShape::Square,
        MarkerShape::Triangle,
        MarkerShape::Diamond,
        MarkerShape::Cross,
        MarkerShape::X,
    ];
    let dir = tempfile::tempdir().unwrap();
    for n_dim in [2, 3] {
        let mut plot = Plot::new(config(), Scatter::default()).unwrap();
        for (i, shape) in shapes.iter().enumerate() {
            let options = SeriesOptions::new()
                .marker(*shape)
                .size(6)
                .label(format!("{shape:?}"));
            plot.add(front(n_dim) + i as f64, options);
        }
        let p = dir.path().join(format!("markers{n_dim}.svg"));
        plot.save(&p, SaveOptions::default()).unwrap();
        assert_svg(&p);
        let svg = fs::read_to_string(&p).unwrap();
        assert!(svg.contains("<polygon") || svg.contains("<polyline"));
        assert!(svg.contains("<rect"));
    }

    let png = dir.path().join("markers.png");
    let mut plot = Plot::new(config(), Scatter::default()).unwrap();
    plot.add(front(2), SeriesOptions::new().marker(MarkerShape::Diamond));
    plot.save(&png, SaveOptions::default()).unwrap();
    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn scatter_matrix_png() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("matrix.png");
    let cfg = config().with_tight_layout(true).with_cmap_name("viridis");
    render(Scatter::default().with_kind(SeriesKind::LinePoints), cfg, &[front(4), front(4) + 1.0], &p);
    let meta = fs::metadata(&p).expect("png written");
    assert!(meta.len() > 0);
}

#[test]
fn pcp_svg_with_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("pcp.svg");
    let cfg = config().with_font(FontChoice::SansSerif).with_reverse(true);
    render(Pcp::default(), cfg, &[front(5)], &p);
    assert_svg(&p);
}

#[test]
fn background_and_standard_bbox() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("bg.svg");
    let mut plot = Plot::new(config(), Scatter::default()).unwrap();
    plot.add(array![[1.0, 2.0], [2.0, 1.0]], SeriesOptions::new());
    plot.save(
        &p,
        SaveOptions {
            bbox: Some(BBox::Standard),
            background: Some(Rgb8::new(0x12, 0x34, 0x56)),
        },
    )
    .unwrap();
    let s = fs::read_to_string(&p).unwrap().to_ascii_uppercase();
    assert!(s.contains("#123456"));
}

#[test]
fn rgb_buffer_matches_figure_size() {
    let mut plot = Plot::new(config().with_fig_size(320, 240), Scatter::default()).unwrap();
    plot.add(front(2), SeriesOptions::new());
    plot.plot_if_not_done_yet().unwrap();
    let buf = plot.figure().unwrap().to_rgb().unwrap();
    assert_eq!(buf.len(), 320 * 240 * 3);
}
