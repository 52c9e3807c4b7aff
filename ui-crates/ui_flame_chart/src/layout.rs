//! Vertical layout of the chart
//!
//! Y coordinates are in content space: `0` is the top of the timestamp
//! header and sections are stacked below it. The header stays pinned to the
//! top of the viewport while the content scrolls underneath.

use crate::model::FlameChartModel;
use crate::style::FlameChartStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Blocks,
    TimeSeries,
}

/// Placement of one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    pub kind: SectionKind,
    /// Index into the model's block or time series sections
    pub index: usize,
    /// Top of the label strip
    pub y: f32,
    pub height: f32,
    pub label_height: f32,
    /// Top of the first row
    pub content_y: f32,
    /// Block rows or time series tracks
    pub rows: usize,
    pub row_height: f32,
    pub row_pitch: f32,
}

impl SectionLayout {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y && y < self.bottom()
    }

    pub fn in_label(&self, y: f32) -> bool {
        y >= self.y && y < self.y + self.label_height
    }

    /// Top of a block row or time series track
    pub fn row_y(&self, row: usize) -> f32 {
        self.content_y + row as f32 * self.row_pitch
    }

    /// Row under `y`, `None` on padding or in the gap between rows
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let offset = y - self.content_y;
        if offset < 0.0 || self.row_pitch <= 0.0 {
            return None;
        }
        let row = (offset / self.row_pitch).floor() as usize;
        if row >= self.rows || offset - row as f32 * self.row_pitch >= self.row_height {
            return None;
        }
        Some(row)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub sections: Vec<SectionLayout>,
    header_height: f32,
    content_height: f32,
}

impl ChartLayout {
    pub fn compute(model: &FlameChartModel, style: &FlameChartStyle) -> Self {
        let mut sections = Vec::with_capacity(
            model.block_sections.len() + model.time_series_sections.len(),
        );
        let mut y = style.timestamp_header_size;

        let block_rows = model.block_sections.iter().map(|s| s.row_count());
        let track_rows = model.time_series_sections.iter().map(|s| s.tracks.len());

        for (index, rows) in block_rows.enumerate() {
            let section = place_section(
                SectionKind::Blocks,
                index,
                y,
                rows,
                style.block_height,
                style.block_row_pitch(),
                style,
            );
            y = section.bottom();
            sections.push(section);
        }

        for (index, rows) in track_rows.enumerate() {
            let section = place_section(
                SectionKind::TimeSeries,
                index,
                y,
                rows,
                style.time_series_height,
                style.time_series_row_pitch(),
                style,
            );
            y = section.bottom();
            sections.push(section);
        }

        Self {
            sections,
            header_height: style.timestamp_header_size,
            content_height: y,
        }
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Total height including the header
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Sections intersecting `top..bottom`
    pub fn sections_in(&self, top: f32, bottom: f32) -> impl Iterator<Item = &SectionLayout> {
        let first = self.sections.partition_point(|s| s.bottom() <= top);
        self.sections[first..]
            .iter()
            .take_while(move |s| s.y < bottom)
    }

    pub fn section_at(&self, y: f32) -> Option<&SectionLayout> {
        let index = self.sections.partition_point(|s| s.bottom() <= y);
        self.sections.get(index).filter(|s| s.contains_y(y))
    }

    pub fn block_section(&self, index: usize) -> Option<&SectionLayout> {
        self.find(SectionKind::Blocks, index)
    }

    pub fn time_series_section(&self, index: usize) -> Option<&SectionLayout> {
        self.find(SectionKind::TimeSeries, index)
    }

    fn find(&self, kind: SectionKind, index: usize) -> Option<&SectionLayout> {
        self.sections
            .iter()
            .find(|s| s.kind == kind && s.index == index)
    }
}

fn place_section(
    kind: SectionKind,
    index: usize,
    y: f32,
    rows: usize,
    row_height: f32,
    row_pitch: f32,
    style: &FlameChartStyle,
) -> SectionLayout {
    let content_y = y + style.section_label_height + style.section_padding_top;
    let height = style.section_label_height
        + style.section_padding_top
        + rows as f32 * row_pitch
        + style.section_padding_bottom;

    SectionLayout {
        kind,
        index,
        y,
        height,
        label_height: style.section_label_height,
        content_y,
        rows,
        row_height,
        row_pitch,
    }
}
