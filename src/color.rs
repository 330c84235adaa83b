// src/color.rs

//! Deterministic label → color assignment.
//!
//! Every unit gets a stable color derived from a hash of its name, so the same
//! unit is tagged with the same color across runs and across its stdout/stderr
//! lines. No randomness anywhere; tests rely on reproducibility.

use owo_colors::AnsiColors;

/// Number of entries in each palette.
pub const PALETTE_SIZE: usize = 6;

const FG_PALETTE: [AnsiColors; PALETTE_SIZE] = [
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::White,
];

const BG_PALETTE: [AnsiColors; PALETTE_SIZE] = [
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::White,
];

/// Whether the picked color is applied to text or to its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorUsage {
    Foreground,
    Background,
}

/// Pick a palette color for `label`.
///
/// The index comes from the first 3 hex digits of the label's md5 digest,
/// reduced modulo the palette size. For background usage the index is mirrored
/// against the palette so a label's foreground and background picks tend to
/// differ.
pub fn color_for(label: &str, usage: ColorUsage) -> AnsiColors {
    let index = palette_index(label);
    match usage {
        ColorUsage::Foreground => FG_PALETTE[index],
        ColorUsage::Background => BG_PALETTE[PALETTE_SIZE - 1 - index],
    }
}

fn palette_index(label: &str) -> usize {
    let digest = md5::compute(label.as_bytes());
    let hex = format!("{digest:x}");
    // First 3 hex digits always parse; md5 digests are 32 hex chars.
    let slice = u32::from_str_radix(&hex[..3], 16).unwrap_or(0);
    slice as usize % PALETTE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_same_color() {
        for label in ["api", "web", "worker", "a strange / label"] {
            let first = color_for(label, ColorUsage::Foreground);
            let second = color_for(label, ColorUsage::Foreground);
            assert_eq!(first, second);

            let bg_first = color_for(label, ColorUsage::Background);
            let bg_second = color_for(label, ColorUsage::Background);
            assert_eq!(bg_first, bg_second);
        }
    }

    #[test]
    fn known_labels_map_to_expected_colors() {
        // md5("api") starts with hex digits that reduce to index 5.
        assert_eq!(color_for("api", ColorUsage::Foreground), AnsiColors::White);
        assert_eq!(color_for("api", ColorUsage::Background), AnsiColors::Green);
        // md5("web") reduces to index 4.
        assert_eq!(color_for("web", ColorUsage::Foreground), AnsiColors::Cyan);
        assert_eq!(color_for("web", ColorUsage::Background), AnsiColors::Yellow);
    }

    #[test]
    fn background_mirrors_foreground_index() {
        for label in ["api", "web", "worker", "frontend", "backend"] {
            let fg_idx = FG_PALETTE
                .iter()
                .position(|c| *c == color_for(label, ColorUsage::Foreground))
                .unwrap();
            let bg_idx = BG_PALETTE
                .iter()
                .position(|c| *c == color_for(label, ColorUsage::Background))
                .unwrap();
            assert_eq!(bg_idx, PALETTE_SIZE - 1 - fg_idx);
        }
    }

    #[test]
    fn distribution_is_roughly_uniform() {
        // Statistical property: over 40 distinct labels, no single color should
        // claim more than a third of the picks.
        let mut counts = [0usize; PALETTE_SIZE];
        let total = 40;
        for i in 0..total {
            let label = format!("svc-{i}");
            let color = color_for(&label, ColorUsage::Foreground);
            let idx = FG_PALETTE.iter().position(|c| *c == color).unwrap();
            counts[idx] += 1;
        }
        let max = counts.iter().copied().max().unwrap();
        assert!(
            max <= total / 3,
            "color distribution too skewed: {counts:?}"
        );
    }
}
