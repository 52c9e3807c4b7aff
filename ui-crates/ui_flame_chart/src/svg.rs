//! SVG rendering backend
//!
//! Draws a snapshot of the chart as it appears in the viewport: sections
//! scroll under a pinned timestamp header and the scrollbar sits on the right.

use std::fmt::Write;
use crate::chart::FlameChart;
use crate::colors::{self, Hsla};
use crate::layout::{SectionKind, SectionLayout};
use crate::ruler::label_baseline;
use crate::style_constants::MIN_LABELED_BLOCK_WIDTH;
use crate::time_series::plot_track;

/// Average glyph advance relative to the font size, for label truncation
const CHAR_WIDTH_RATIO: f32 = 0.6;
const BLOCK_LABEL_PADDING: f32 = 4.0;
const MIN_SCROLLBAR_THUMB: f32 = 16.0;

pub fn render_svg(chart: &FlameChart) -> String {
    let viewport = chart.viewport();
    let layout = chart.layout();
    let plot_width = viewport.plot_width();
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="monospace">"#,
        w = viewport.width,
        h = viewport.height,
    );
    let _ = writeln!(
        out,
        r#"<defs><clipPath id="plot"><rect x="0" y="0" width="{}" height="{}"/></clipPath></defs>"#,
        plot_width, viewport.height
    );
    out.push_str("<g clip-path=\"url(#plot)\">\n");

    let visible = viewport.visible_content_range();
    for section in layout.sections_in(visible.start, visible.end) {
        render_section_label(&mut out, chart, section);
        match section.kind {
            SectionKind::Blocks => render_blocks(&mut out, chart, section),
            SectionKind::TimeSeries => render_time_series(&mut out, chart, section),
        }
    }

    render_header(&mut out, chart);
    out.push_str("</g>\n");
    render_scrollbar(&mut out, chart);
    out.push_str("</svg>\n");

    tracing::debug!(
        "[SVG] rendered {} bytes for {}x{} viewport",
        out.len(),
        viewport.width,
        viewport.height
    );
    out
}

fn render_section_label(out: &mut String, chart: &FlameChart, section: &SectionLayout) {
    let model = chart.model();
    let style = chart.style();
    let y = section.y - chart.viewport().scroll_y;
    let name = match section.kind {
        SectionKind::Blocks => model.block_sections.get(section.index).map(|s| s.name.as_str()),
        SectionKind::TimeSeries => model.time_series_sections.get(section.index).map(|s| s.name.as_str()),
    }
    .unwrap_or_default();

    let _ = writeln!(
        out,
        r#"<rect x="0" y="{}" width="{}" height="{}" fill="{}"/>"#,
        y,
        chart.viewport().plot_width(),
        section.label_height,
        colors::SECTION_LABEL_BACKGROUND.to_css()
    );
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
        BLOCK_LABEL_PADDING,
        y + (section.label_height + style.timestamp_font_size) / 2.0,
        style.timestamp_font_size,
        colors::TEXT.to_css(),
        escape_xml(name)
    );
}

fn render_blocks(out: &mut String, chart: &FlameChart, section: &SectionLayout) {
    let Some(blocks) = chart.model().block_sections.get(section.index) else {
        return;
    };
    let viewport = chart.viewport();
    let style = chart.style();

    for merged in chart.visible_blocks(section.index) {
        let x = viewport.time_to_x(merged.start);
        let width = (viewport.time_to_x(merged.end) - x).max(1.0);
        let y = section.row_y(merged.row) - viewport.scroll_y;
        let block = &blocks.rows[merged.row][merged.index];
        let color: Hsla = if merged.is_merged() {
            colors::MERGED_BLOCK_COLOR
        } else {
            block.color
        };

        let _ = write!(
            out,
            r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}">"#,
            x,
            y,
            width,
            style.block_height,
            color.to_css()
        );
        let _ = write!(out, "<title>{}</title>", escape_xml(&block.label));
        out.push_str("</rect>\n");

        if !merged.is_merged() && width >= MIN_LABELED_BLOCK_WIDTH {
            let label = truncate_label(&block.label, width - 2.0 * BLOCK_LABEL_PADDING, style.timestamp_font_size);
            if !label.is_empty() {
                let _ = writeln!(
                    out,
                    r#"<text x="{:.2}" y="{}" font-size="{}" fill="white">{}</text>"#,
                    x.max(0.0) + BLOCK_LABEL_PADDING,
                    y + (style.block_height + style.timestamp_font_size) / 2.0 - 1.0,
                    style.timestamp_font_size,
                    escape_xml(&label)
                );
            }
        }
    }
}

fn render_time_series(out: &mut String, chart: &FlameChart, section: &SectionLayout) {
    let Some(series) = chart.model().time_series_sections.get(section.index) else {
        return;
    };
    let viewport = chart.viewport();
    let style = chart.style();

    for (track_index, track) in series.tracks.iter().enumerate() {
        let points = plot_track(track, section.row_y(track_index), viewport, style);
        if points.is_empty() {
            continue;
        }
        let color = track.color.to_css();

        let mut path = String::new();
        for point in &points {
            let _ = write!(path, "{:.2},{:.2} ", point.x, point.y - viewport.scroll_y);
        }
        let _ = writeln!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            path.trim_end(),
            color
        );
        for point in &points {
            let _ = writeln!(
                out,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
                point.x,
                point.y - viewport.scroll_y,
                point.radius,
                color
            );
        }
    }
}

fn render_header(out: &mut String, chart: &FlameChart) {
    let viewport = chart.viewport();
    let style = chart.style();
    let header = chart.layout().header_height();
    let baseline = label_baseline(style);

    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        viewport.plot_width(),
        header,
        colors::HEADER_BACKGROUND.to_css()
    );

    let grid = colors::GRID_LINE.to_css();
    for tick in chart.ticks() {
        let _ = writeln!(
            out,
            r#"<line x1="{x:.2}" y1="0" x2="{x:.2}" y2="{}" stroke="{}"/>"#,
            viewport.height,
            grid,
            x = tick.x
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{}" font-size="{}" fill="{}">{}</text>"#,
            tick.x + 2.0,
            baseline,
            style.timestamp_font_size,
            colors::TEXT.to_css(),
            escape_xml(&tick.label)
        );
    }
}

fn render_scrollbar(out: &mut String, chart: &FlameChart) {
    let viewport = chart.viewport();
    let content_height = chart.layout().content_height();
    let x = viewport.scrollbar_x();
    let width = viewport.width - x;
    if width <= 0.0 {
        return;
    }

    let _ = writeln!(
        out,
        r#"<rect x="{}" y="0" width="{}" height="{}" fill="{}"/>"#,
        x,
        width,
        viewport.height,
        colors::SCROLLBAR_TRACK.to_css()
    );

    if content_height > viewport.height && content_height > 0.0 {
        let (thumb_y, thumb_height) = scrollbar_thumb(viewport.scroll_y, viewport.height, content_height);
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{:.2}" width="{}" height="{:.2}" rx="{}" fill="{}"/>"#,
            x + 2.0,
            thumb_y,
            (width - 4.0).max(1.0),
            thumb_height,
            width / 2.0,
            colors::SCROLLBAR_THUMB.to_css()
        );
    }
}

/// Thumb position and size for a track as tall as the viewport
fn scrollbar_thumb(scroll_y: f32, height: f32, content_height: f32) -> (f32, f32) {
    let thumb_height = (height * height / content_height).clamp(MIN_SCROLLBAR_THUMB.min(height), height);
    let max_scroll = content_height - height;
    let thumb_y = if max_scroll > 0.0 {
        scroll_y / max_scroll * (height - thumb_height)
    } else {
        0.0
    };
    (thumb_y, thumb_height)
}

/// Cut `label` so it fits in `width` pixels, adding an ellipsis when shortened
fn truncate_label(label: &str, width: f32, font_size: f32) -> String {
    let char_width = font_size * CHAR_WIDTH_RATIO;
    if char_width <= 0.0 {
        return String::new();
    }
    let max_chars = (width / char_width).floor().max(0.0) as usize;
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }
    if max_chars <= 1 {
        return String::new();
    }
    let mut truncated: String = label.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
