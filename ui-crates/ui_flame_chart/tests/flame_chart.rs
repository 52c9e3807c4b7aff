use std::path::PathBuf;
use ui_flame_chart::style_constants::*;
use ui_flame_chart::{
    check_scrollbar_sync, ChartData, FlameChart, FlameChartModel, FlameChartStyle, Hit, SectionKind,
    FLAME_CHART_CSS,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bazel_profile.json")
}

fn load_chart(width: f32, height: f32) -> FlameChart {
    let profile = profiling::read_profile(fixture_path()).unwrap();
    FlameChart::from_profile(&profile, FlameChartStyle::default(), width, height)
}

#[test]
fn test_bazel_profile_model() {
    let profile = profiling::read_profile(fixture_path()).unwrap();
    let model = FlameChartModel::build(&profile);

    let names: Vec<&str> = model.block_sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Critical Path", "skyframe-evaluator-0", "skyframe-evaluator-1"]);

    let rows: Vec<usize> = model.block_sections.iter().map(|s| s.row_count()).collect();
    assert_eq!(rows, [1, 2, 2]);
    assert_eq!(model.block_count(), 9);

    let series: Vec<&str> = model.time_series_sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(series, ["CPU usage (Bazel)", "Memory usage (Bazel)"]);
    assert_eq!(model.time_series_sections[0].tracks[0].points.len(), 3);
    assert_eq!(model.time_series_sections[0].tracks[0].max_value, 1.85);

    assert!((model.end_time - 1.39).abs() < 1e-9);
}

#[test]
fn test_layout_stacks_sections_under_header() {
    let chart = load_chart(1000.0, 600.0);
    let layout = chart.layout();

    assert_eq!(layout.header_height(), TIMESTAMP_HEADER_SIZE);
    assert_eq!(layout.sections[0].y, TIMESTAMP_HEADER_SIZE);
    for pair in layout.sections.windows(2) {
        assert_eq!(pair[0].bottom(), pair[1].y);
    }

    let kinds: Vec<SectionKind> = layout.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            SectionKind::Blocks,
            SectionKind::Blocks,
            SectionKind::Blocks,
            SectionKind::TimeSeries,
            SectionKind::TimeSeries,
        ]
    );

    let first = &layout.sections[0];
    assert_eq!(first.content_y - first.y, SECTION_LABEL_HEIGHT + SECTION_PADDING_TOP);
    let evaluator = &layout.sections[1];
    assert_eq!(evaluator.row_y(1) - evaluator.row_y(0), BLOCK_HEIGHT + BLOCK_VERTICAL_GAP);
    let cpu = &layout.sections[3];
    assert_eq!(cpu.row_height, TIME_SERIES_HEIGHT);
}

#[test]
fn test_viewport_reserves_scrollbar() {
    let chart = load_chart(1000.0, 600.0);
    assert_eq!(chart.viewport().plot_width(), 1000.0 - VERTICAL_SCROLLBAR_WIDTH);
    assert_eq!(chart.viewport().visible_time_range(), 0.0..1.39);
}

#[test]
fn test_zoom_then_hit_block() {
    let mut chart = load_chart(1000.0, 600.0);
    let plot_width = chart.viewport().plot_width();

    // Zoom 4x around the left edge: the visible range becomes 0..0.3475s
    chart.zoom_at(0.0, 4.0);
    assert_eq!(chart.viewport().start_time, 0.0);
    assert!((chart.viewport().end_time - 1.39 / 4.0).abs() < 1e-9);

    // 0.2s falls inside "Compiling src/main.cc" (0.12s..0.97s) on the evaluator's first row
    let x = chart.viewport().time_to_x(0.2);
    assert!(x > 0.0 && x < plot_width);
    let section = chart.layout().block_section(1).unwrap();
    let y = section.row_y(0) + BLOCK_HEIGHT / 2.0;

    match chart.hit_test(x, y) {
        Some(Hit::Block { section, row, index }) => {
            let block = &chart.model().block_sections[section].rows[row][index];
            assert_eq!(block.label, "Compiling src/main.cc");
        }
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_ticks_are_spaced_for_labels() {
    let chart = load_chart(1000.0, 600.0);
    let ticks = chart.ticks();
    assert!(ticks.len() >= 2);
    assert_eq!(ticks[0].label, "0s");
    for pair in ticks.windows(2) {
        assert!(pair[1].x - pair[0].x >= TIMESTAMP_FONT_SIZE);
    }
}

#[test]
fn test_svg_contains_every_layer() {
    let svg = load_chart(1000.0, 600.0).render_svg();
    assert!(svg.contains("Critical Path"));
    assert!(svg.contains("skyframe-evaluator-1"));
    assert!(svg.contains("CPU usage (Bazel)"));
    assert!(svg.contains("<title>action &apos;Linking bin/app&apos;</title>"));
    assert!(svg.contains("<circle"));
}

#[test]
fn test_shipped_stylesheet_in_sync() {
    check_scrollbar_sync(VERTICAL_SCROLLBAR_WIDTH, FLAME_CHART_CSS).unwrap();
}

#[test]
fn test_custom_style_changes_geometry() {
    let style = FlameChartStyle::from_toml_str("block_height = 20.0\nvertical_scrollbar_width = 10.0").unwrap();
    let profile = profiling::read_profile(fixture_path()).unwrap();
    let chart = FlameChart::from_profile(&profile, style, 1000.0, 600.0);

    assert_eq!(chart.viewport().plot_width(), 990.0);
    let section = chart.layout().block_section(1).unwrap();
    assert_eq!(section.row_y(1) - section.row_y(0), 20.0 + BLOCK_VERTICAL_GAP);
}

#[test]
fn test_chart_data_feeds_chart() {
    let profile = profiling::read_profile(fixture_path()).unwrap();
    let data = ChartData::from_profile(&profile);
    let chart = FlameChart::new(data.get_model(), FlameChartStyle::default(), 800.0, 400.0);
    assert_eq!(chart.model().block_count(), 9);
}
