//! Color palette for flame chart blocks and time series

/// Hue in degrees, saturation/lightness/alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Hsla {
    Hsla { h, s, l, a }
}

impl Hsla {
    pub fn to_css(&self) -> String {
        format!(
            "hsla({:.0}, {:.0}%, {:.0}%, {})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

const PALETTE: [Hsla; 16] = [
    hsla(210.0, 0.75, 0.55, 1.0), // Blue
    hsla(30.0, 0.80, 0.55, 1.0),  // Orange
    hsla(140.0, 0.70, 0.50, 1.0), // Green
    hsla(340.0, 0.75, 0.55, 1.0), // Pink
    hsla(270.0, 0.70, 0.55, 1.0), // Purple
    hsla(180.0, 0.65, 0.50, 1.0), // Cyan
    hsla(50.0, 0.75, 0.55, 1.0),  // Yellow
    hsla(10.0, 0.75, 0.55, 1.0),  // Red-Orange
    hsla(160.0, 0.70, 0.50, 1.0), // Teal
    hsla(290.0, 0.70, 0.55, 1.0), // Violet
    hsla(195.0, 0.70, 0.55, 1.0), // Sky Blue
    hsla(80.0, 0.65, 0.50, 1.0),  // Lime
    hsla(320.0, 0.75, 0.55, 1.0), // Magenta
    hsla(40.0, 0.75, 0.55, 1.0),  // Amber
    hsla(250.0, 0.70, 0.55, 1.0), // Indigo
    hsla(120.0, 0.70, 0.50, 1.0), // Emerald
];

pub const MERGED_BLOCK_COLOR: Hsla = hsla(0.0, 0.0, 0.55, 1.0);
pub const HEADER_BACKGROUND: Hsla = hsla(0.0, 0.0, 0.97, 1.0);
pub const SECTION_LABEL_BACKGROUND: Hsla = hsla(0.0, 0.0, 0.93, 1.0);
pub const GRID_LINE: Hsla = hsla(0.0, 0.0, 0.5, 0.3);
pub const TEXT: Hsla = hsla(0.0, 0.0, 0.15, 1.0);
pub const SCROLLBAR_TRACK: Hsla = hsla(0.0, 0.0, 0.95, 1.0);
pub const SCROLLBAR_THUMB: Hsla = hsla(0.0, 0.0, 0.7, 1.0);

pub fn get_palette() -> &'static [Hsla] {
    &PALETTE
}

/// Color for a block label; repeated actions share a color across runs,
/// platforms and Rust releases
pub fn color_for_label(label: &str) -> Hsla {
    PALETTE[(fnv1a(label.as_bytes()) % PALETTE.len() as u64) as usize]
}

/// 64-bit FNV-1a
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u64).wrapping_mul(PRIME)
    })
}

/// Color for the n-th time series track
pub fn series_color(index: usize) -> Hsla {
    PALETTE[index % PALETTE.len()]
}
