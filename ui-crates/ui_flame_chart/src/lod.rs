//! Visible block queries with level-of-detail merging
//!
//! Rows are sorted by start and never overlap, so their end times are sorted
//! as well and both edges of the visible window can be found by binary
//! search. Query cost is O(rows * log(blocks) + output).

use crate::model::BlockSection;
use crate::viewport::Viewport;

/// A block, or a run of adjacent sub-pixel blocks drawn as one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedBlock {
    pub row: usize,
    /// Index of the first merged block within its row
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl MergedBlock {
    pub fn is_merged(&self) -> bool {
        self.count > 1
    }
}

/// Blocks of `section` intersecting the viewport's time range.
///
/// Neighbouring blocks narrower than `min_width` pixels whose gap is under a
/// pixel collapse into a single entry.
pub fn visible_blocks(section: &BlockSection, viewport: &Viewport, min_width: f32) -> Vec<MergedBlock> {
    let range = viewport.visible_time_range();
    let seconds_per_pixel = viewport.seconds_per_pixel();
    let min_duration = min_width as f64 * seconds_per_pixel;
    let mut result = Vec::new();

    for (row_index, row) in section.rows.iter().enumerate() {
        let first = row.partition_point(|b| b.end() < range.start);
        let last = row.partition_point(|b| b.start <= range.end);
        if first >= last {
            continue;
        }

        let mut current: Option<MergedBlock> = None;
        for (index, block) in row[first..last].iter().enumerate() {
            let index = first + index;
            let small = block.duration < min_duration;

            if let Some(merged) = current.as_mut() {
                let merged_small = merged.end - merged.start < min_duration;
                let gap = block.start - merged.end;
                if small && merged_small && gap < seconds_per_pixel {
                    merged.end = merged.end.max(block.end());
                    merged.count += 1;
                    continue;
                }
                result.push(*merged);
            }

            current = Some(MergedBlock {
                row: row_index,
                index,
                start: block.start,
                end: block.end(),
                count: 1,
            });
        }
        result.extend(current);
    }

    result
}
