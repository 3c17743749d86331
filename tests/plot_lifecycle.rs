use moo_viz::figure::{ArtistStyle, AxesSet};
use moo_viz::renderers::Scatter;
use moo_viz::{
    AxisLabels, Backend, Plot, PlotConfig, PlotContext, PlotError, Rgb8, SeriesOptions, TitleSpec,
};
use ndarray::{Array, ArrayD, IxDyn, array};

fn headless() -> PlotConfig {
    PlotConfig::default().with_backend(Backend::Headless)
}

fn scatter_plot(config: PlotConfig) -> Plot<Scatter> {
    Plot::new(config, Scatter::default()).unwrap()
}

#[test]
fn draw_without_data_fails() {
    let mut plot = scatter_plot(headless());
    assert!(matches!(plot.draw(), Err(PlotError::NoData)));
}

#[test]
fn mismatching_widths_are_reported_sorted_and_distinct() {
    let mut plot = scatter_plot(headless());
    plot.add(Array::zeros((2, 3)), SeriesOptions::new())
        .add(Array::zeros((2, 2)), SeriesOptions::new())
        .add(Array::zeros((5, 3)), SeriesOptions::new());
    match plot.draw() {
        Err(PlotError::DimensionMismatch(dims)) => assert_eq!(dims, vec![2, 3]),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn labels_follow_the_symbol_or_explicit_list() {
    let mut plot = scatter_plot(headless());
    assert!(matches!(plot.labels(), Err(PlotError::DimensionUnknown)));
    plot.add(Array::zeros((4, 3)), SeriesOptions::new());
    plot.draw().unwrap();
    assert_eq!(plot.labels().unwrap(), ["$f_1$", "$f_2$", "$f_3$"]);

    let config = headless().with_axis_labels(AxisLabels::Symbol("g".into()));
    let mut plot = scatter_plot(config);
    plot.add(Array::zeros((1, 2)), SeriesOptions::new());
    plot.draw().unwrap();
    assert_eq!(plot.labels().unwrap(), ["$g_1$", "$g_2$"]);

    let config = headless().with_axis_labels(AxisLabels::Explicit(vec!["cost".into()]));
    let mut plot = scatter_plot(config);
    plot.add(Array::zeros((1, 2)), SeriesOptions::new());
    assert!(matches!(
        plot.draw(),
        Err(PlotError::LabelCountMismatch {
            expected: 2,
            got: 1
        })
    ));
}

#[test]
fn arrays_of_any_supported_rank() {
    let mut plot = scatter_plot(headless());
    plot.add_array(ArrayD::<f64>::zeros(IxDyn(&[3])), SeriesOptions::new()).unwrap();
    assert_eq!(plot.datasets()[0].values.dim(), (1, 3));

    plot.add_array(None, SeriesOptions::new()).unwrap();
    assert_eq!(plot.datasets().len(), 1);

    plot.add_array(ArrayD::<f64>::zeros(IxDyn(&[2, 4, 3])), SeriesOptions::new())
        .unwrap();
    assert_eq!(plot.datasets().len(), 3);

    let err = plot
        .add_array(ArrayD::<f64>::zeros(IxDyn(&[1, 1, 1, 1])), SeriesOptions::new())
        .unwrap_err();
    assert!(matches!(err, PlotError::UnsupportedRank(4)));
}

#[test]
fn title_list_must_match_subplots() {
    let config = headless().with_title(TitleSpec::per_axes(["only one"]));
    let mut plot = scatter_plot(config);
    plot.add(Array::zeros((3, 4)), SeriesOptions::new());
    assert!(matches!(
        plot.plot_if_not_done_yet(),
        Err(PlotError::TitleCountMismatch {
            expected: 16,
            got: 1
        })
    ));
}

#[test]
fn title_mismatch_fails_every_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless().with_title(TitleSpec::per_axes(["a", "b", "c"]));
    let mut plot = scatter_plot(config);
    plot.add(array![[1.0, 2.0], [2.0, 1.0]], SeriesOptions::new());
    let path = dir.path().join("never.svg");
    for _ in 0..2 {
        assert!(matches!(
            plot.save(&path, Default::default()),
            Err(PlotError::TitleCountMismatch {
                expected: 1,
                got: 3
            })
        ));
    }
    assert!(plot.axes().is_none());
    assert!(!path.exists());
}

#[test]
fn objectives_are_required() {
    let mut plot = scatter_plot(headless());
    plot.add(Array::zeros((0, 0)), SeriesOptions::new());
    assert!(matches!(plot.draw(), Err(PlotError::NoObjectives)));
    let mut plot = scatter_plot(headless());
    plot.add(Array::zeros((3, 0)), SeriesOptions::new());
    assert!(matches!(plot.plot_if_not_done_yet(), Err(PlotError::NoObjectives)));
    assert!(plot.axes().is_none());
}

#[test]
fn empty_title_is_skipped() {
    let config = headless().with_title(TitleSpec::single(""));
    let mut plot = scatter_plot(config);
    plot.add(array![[1.0, 2.0]], SeriesOptions::new());
    plot.plot_if_not_done_yet().unwrap();
    assert!(plot.axes().unwrap().iter().all(|ax| ax.title.is_none()));
}

#[test]
fn reset_discards_subplots_and_next_save_redraws() {
    let dir = tempfile::tempdir().unwrap();
    let mut plot = scatter_plot(headless());
    plot.add(array![[1.0, 2.0], [2.0, 1.0]], SeriesOptions::new());
    plot.plot_if_not_done_yet().unwrap();
    assert!(plot.axes().is_some());

    plot.reset();
    assert!(plot.figure().is_some());
    assert!(plot.axes().is_none());

    plot.save(dir.path().join("again.svg"), Default::default()).unwrap();
    assert!(matches!(plot.axes(), Some(AxesSet::Single(_))));
}

#[test]
fn set_axis_style_merges() {
    let mut plot = scatter_plot(headless());
    plot.set_axis_style([("color", "blue")]);
    plot.set_axis_style([("alpha", 0.5)]);
    plot.set_axis_style([("color", "black")]);
    let style = &plot.config().axis_style;
    assert_eq!(style.len(), 2);
    assert_eq!(style.color("color"), Some(Rgb8::BLACK));
    assert_eq!(style.number("alpha"), Some(0.5));
}

#[test]
fn show_is_a_no_op_when_headless() {
    let mut plot = scatter_plot(headless());
    plot.add(array![[1.0, 2.0]], SeriesOptions::new());
    plot.show(&Default::default()).unwrap();
    assert!(plot.axes().is_some());
}

#[test]
fn closures_can_render() {
    let renderer = |ctx: &mut PlotContext| -> moo_viz::Result<()> {
        let n = ctx.datasets().len();
        let axes = ctx.init_figure(1, n, false, false)?;
        for ax in axes.iter_mut() {
            ax.scatter(vec![[0.0, 0.0, 0.0]], ArtistStyle::new(Rgb8::BLACK), None);
        }
        Ok(())
    };
    let mut plot = Plot::new(headless(), renderer).unwrap();
    plot.add(array![[1.0]], SeriesOptions::new())
        .add(array![[2.0]], SeriesOptions::new());
    plot.draw().unwrap();
    assert_eq!(plot.axes().unwrap().shape(), (1, 2));
}

#[test]
fn unknown_colormap_is_rejected_up_front() {
    let err = Plot::new(headless().with_cmap_name("nope"), Scatter::default()).unwrap_err();
    assert!(matches!(err, PlotError::UnknownColormap(name) if name == "nope"));
}
