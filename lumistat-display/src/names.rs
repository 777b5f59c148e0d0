//! Mode and palette name resolution
//!
//! Maps the numeric effect-mode and palette ids from the controller to
//! human-readable names, truncated to the display width with a `~`
//! marker when a name does not fit. Ids beyond the known tables format
//! as `Mode <n>` / `Palette <n>` so the panel never shows stale garbage
//! for an unknown id.

use core::fmt::Write;
use heapless::String;

use crate::screen::SCREEN_COLS;

/// Marker appended when a name exceeds the display width
pub const TRUNCATION_MARKER: char = '~';

/// Effect mode names, indexed by mode id
pub const MODE_NAMES: &[&str] = &[
    "Solid",
    "Blink",
    "Breathe",
    "Wipe",
    "Wipe Random",
    "Random Colors",
    "Sweep",
    "Dynamic",
    "Colorloop",
    "Rainbow",
    "Scan",
    "Scan Dual",
    "Fade",
    "Theater",
    "Theater Rainbow",
    "Running",
    "Saw",
    "Twinkle",
    "Dissolve",
    "Dissolve Rnd",
    "Sparkle",
    "Sparkle Dark",
    "Sparkle+",
    "Strobe",
    "Strobe Rainbow",
    "Strobe Mega",
    "Blink Rainbow",
    "Android",
    "Chase",
    "Chase Random",
    "Chase Rainbow",
    "Chase Flash",
];

/// Palette names, indexed by palette id
pub const PALETTE_NAMES: &[&str] = &[
    "Default",
    "* Random Cycle",
    "* Color 1",
    "* Colors 1&2",
    "* Color Gradient",
    "* Colors Only",
    "Party",
    "Cloud",
    "Lava",
    "Ocean",
    "Forest",
    "Rainbow",
    "Rainbow Bands",
    "Sunset",
    "Rivendell",
    "Breeze",
];

/// A resolved name, at most one display row wide
pub type Name = String<SCREEN_COLS>;

/// Truncate `text` to the display width
///
/// Names wider than the display keep `width - 1` characters and end in
/// the truncation marker.
pub fn fit(text: &str, width: usize) -> Name {
    let mut out = Name::new();
    if text.chars().count() <= width {
        for ch in text.chars() {
            if out.push(ch).is_err() {
                break;
            }
        }
    } else {
        for ch in text.chars().take(width.saturating_sub(1)) {
            if out.push(ch).is_err() {
                break;
            }
        }
        let _ = out.push(TRUNCATION_MARKER);
    }
    out
}

/// Resolve an effect mode id to a display-width name
pub fn mode_name(mode_id: u8) -> Name {
    lookup(MODE_NAMES, mode_id, "Mode")
}

/// Resolve a palette id to a display-width name
pub fn palette_name(palette_id: u8) -> Name {
    lookup(PALETTE_NAMES, palette_id, "Palette")
}

fn lookup(table: &[&str], id: u8, fallback: &str) -> Name {
    match table.get(id as usize) {
        Some(name) => fit(name, SCREEN_COLS),
        None => {
            let mut out = Name::new();
            let _ = write!(out, "{} {}", fallback, id);
            fit(out.as_str(), SCREEN_COLS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert_eq!(mode_name(0).as_str(), "Solid");
        assert_eq!(mode_name(9).as_str(), "Rainbow");
        assert_eq!(palette_name(8).as_str(), "Lava");
    }

    #[test]
    fn unknown_ids_fall_back_to_numeric() {
        assert_eq!(mode_name(200).as_str(), "Mode 200");
        assert_eq!(palette_name(99).as_str(), "Palette 99");
    }

    #[test]
    fn wide_names_get_marker() {
        let name = fit("An Extremely Long Effect Name", 19);
        assert_eq!(name.len(), 19);
        assert_eq!(name.as_str(), "An Extremely Long ~");
    }

    #[test]
    fn exact_width_names_are_untouched() {
        let name = fit("0123456789012345678", 19);
        assert_eq!(name.as_str(), "0123456789012345678");
    }
}
