//! Change detection
//!
//! Decides whether the panel content is stale relative to the current
//! controller state. Pure function, no side effects.

use crate::snapshot::StatusSnapshot;

/// Check whether a redraw is required
///
/// Returns true iff an explicit redraw was requested, no baseline exists
/// yet (first tick after startup), or any snapshot field differs from the
/// baseline. Total over its domain; comparison is exhaustive over all
/// fields via `PartialEq`.
pub fn needs_redraw(
    previous: Option<&StatusSnapshot>,
    current: &StatusSnapshot,
    redraw_requested: bool,
) -> bool {
    if redraw_requested {
        return true;
    }
    match previous {
        None => true,
        Some(prev) => prev != current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snap(label: &str, addr: [u8; 4], bri: u8, mode: u8, pal: u8, ma: u32) -> StatusSnapshot {
        let mut s = StatusSnapshot::default();
        let _ = s.network_label.push_str(label);
        s.network_addr = addr;
        s.brightness = bri;
        s.mode_id = mode;
        s.palette_id = pal;
        s.power_draw_ma = ma;
        s
    }

    #[test]
    fn no_baseline_is_always_dirty() {
        let current = snap("Net1", [10, 0, 0, 5], 128, 2, 1, 350);
        assert!(needs_redraw(None, &current, false));
    }

    #[test]
    fn identical_snapshot_is_clean() {
        let current = snap("Net1", [10, 0, 0, 5], 128, 2, 1, 350);
        let prev = current.clone();
        assert!(!needs_redraw(Some(&prev), &current, false));
    }

    #[test]
    fn request_forces_dirty_on_identical_snapshot() {
        let current = snap("Net1", [10, 0, 0, 5], 128, 2, 1, 350);
        let prev = current.clone();
        assert!(needs_redraw(Some(&prev), &current, true));
    }

    #[test]
    fn ap_fields_participate_in_comparison() {
        let prev = snap("Net1", [10, 0, 0, 5], 128, 2, 1, 350);
        let mut current = prev.clone();
        current.ap_mode = true;
        assert!(needs_redraw(Some(&prev), &current, false));

        let mut current = prev.clone();
        let _ = current.ap_password.push_str("hunter2");
        assert!(needs_redraw(Some(&prev), &current, false));
    }

    #[test]
    fn full_string_content_is_compared() {
        // Labels that agree on the truncated display width must still differ
        let prev = snap("VeryLongNetworkName-A", [1, 2, 3, 4], 0, 0, 0, 0);
        let current = snap("VeryLongNetworkName-B", [1, 2, 3, 4], 0, 0, 0, 0);
        assert!(needs_redraw(Some(&prev), &current, false));
    }

    proptest! {
        /// Any single differing field is sufficient to trigger a redraw
        #[test]
        fn single_field_difference_is_dirty(
            bri in 0u8..255,
            mode in 0u8..200,
            pal in 0u8..70,
            ma in 0u32..10_000,
            field in 0usize..6,
        ) {
            let prev = snap("Net1", [10, 0, 0, 5], bri, mode, pal, ma);
            let mut current = prev.clone();
            match field {
                0 => {
                    current.network_label.clear();
                    let _ = current.network_label.push_str("Other");
                }
                1 => current.network_addr[3] = current.network_addr[3].wrapping_add(1),
                2 => current.brightness = current.brightness.wrapping_add(1),
                3 => current.mode_id = current.mode_id.wrapping_add(1),
                4 => current.palette_id = current.palette_id.wrapping_add(1),
                _ => current.power_draw_ma = current.power_draw_ma.wrapping_add(1),
            }
            prop_assert!(needs_redraw(Some(&prev), &current, false));
            // And the unchanged pair stays clean
            prop_assert!(!needs_redraw(Some(&prev), &prev.clone(), false));
        }
    }
}
