//! Render gate: one tick of the display synchronizer
//!
//! Pulls a fresh snapshot, runs change detection, and on a positive
//! verdict drives the render capability and the backlight manager.
//! Owned by the single background display task, so ticks never overlap.

use heapless::String;

use crate::config::{DeviceConfig, MAX_LABEL_LEN};
use crate::detect::needs_redraw;
use crate::power::BacklightManager;
use crate::snapshot::StatusSnapshot;

/// Capability object the gate renders through
///
/// Both calls are best-effort and fire-and-forget: a failed draw is not
/// retried mid-tick, it is simply overwritten by the next dirty tick.
/// Implementations swallow and log transport errors.
pub trait RenderTarget {
    /// Draw a full status frame for the given snapshot
    fn render(&mut self, snapshot: &StatusSnapshot, label: &str);

    /// Set the panel backlight level (0 = off)
    fn set_backlight(&mut self, level: u16);
}

/// Dirty-state display synchronizer
///
/// Holds the last rendered snapshot as the comparison baseline. The
/// baseline starts out absent, which guarantees the first tick renders.
pub struct RenderGate {
    /// Baseline for change detection; `None` until the first render
    last_rendered: Option<StatusSnapshot>,
    /// Set by notification hooks, consumed by the next tick
    redraw_requested: bool,
    backlight: BacklightManager,
    /// Device label passed through to the render capability
    label: String<MAX_LABEL_LEN>,
}

impl RenderGate {
    /// Create a gate from the loaded device configuration
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            last_rendered: None,
            redraw_requested: false,
            backlight: BacklightManager::new(config.backlight_level, config.idle_timeout_ms),
            label: config.label.clone(),
        }
    }

    /// Request a redraw on the next tick
    ///
    /// Called from notification hooks (network reconnect, controller
    /// state change). Does not force an immediate tick.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Run one synchronizer tick
    ///
    /// Returns true when a frame was rendered. The idle-timeout check in
    /// the middle runs independently of the dirty verdict.
    pub fn tick<T: RenderTarget>(
        &mut self,
        now_ms: u64,
        current: StatusSnapshot,
        target: &mut T,
    ) -> bool {
        let dirty = needs_redraw(self.last_rendered.as_ref(), &current, self.redraw_requested);

        if let Some(level) = self.backlight.on_expire(now_ms) {
            target.set_backlight(level);
        }

        if !dirty {
            return false;
        }

        target.render(&current, self.label.as_str());
        self.last_rendered = Some(current);
        self.redraw_requested = false;

        let level = self.backlight.on_rendered(now_ms);
        target.set_backlight(level);
        true
    }

    /// Backlight state, for logging
    pub fn backlight(&self) -> &BacklightManager {
        &self.backlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every capability call for assertions
    #[derive(Default)]
    struct MockTarget {
        renders: usize,
        last_label: String<MAX_LABEL_LEN>,
        backlight_calls: heapless::Vec<u16, 8>,
    }

    impl RenderTarget for MockTarget {
        fn render(&mut self, _snapshot: &StatusSnapshot, label: &str) {
            self.renders += 1;
            self.last_label.clear();
            let _ = self.last_label.push_str(label);
        }

        fn set_backlight(&mut self, level: u16) {
            let _ = self.backlight_calls.push(level);
        }
    }

    fn test_config() -> DeviceConfig {
        DeviceConfig::default() // label "Lumistat", level 50, timeout 10000
    }

    fn snap() -> StatusSnapshot {
        let mut s = StatusSnapshot::default();
        let _ = s.network_label.push_str("Net1");
        s.network_addr = [10, 0, 0, 5];
        s.brightness = 128;
        s.mode_id = 2;
        s.palette_id = 1;
        s.power_draw_ma = 350;
        s
    }

    #[test]
    fn first_tick_renders_and_lights_backlight() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        assert!(gate.tick(0, snap(), &mut target));
        assert_eq!(target.renders, 1);
        assert_eq!(target.last_label.as_str(), "Lumistat");
        assert_eq!(target.backlight_calls.as_slice(), &[50]);
        assert_eq!(gate.backlight().deadline_ms(), 10_000);
    }

    #[test]
    fn unchanged_snapshot_renders_exactly_once() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        assert!(gate.tick(0, snap(), &mut target));
        assert!(!gate.tick(1, snap(), &mut target));
        assert_eq!(target.renders, 1);
        assert_eq!(target.backlight_calls.as_slice(), &[50]);
    }

    #[test]
    fn changed_field_renders_again() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        gate.tick(0, snap(), &mut target);
        let mut changed = snap();
        changed.palette_id = 7;
        assert!(gate.tick(2_000, changed, &mut target));
        assert_eq!(target.renders, 2);
        assert_eq!(gate.backlight().deadline_ms(), 12_000);
    }

    #[test]
    fn request_forces_render_on_unchanged_snapshot() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        gate.tick(0, snap(), &mut target);
        gate.request_redraw();
        assert!(gate.tick(2_000, snap(), &mut target));
        assert_eq!(target.renders, 2);

        // Flag was cleared by the render
        assert!(!gate.tick(4_000, snap(), &mut target));
        assert_eq!(target.renders, 2);
    }

    #[test]
    fn idle_timeout_darkens_without_rendering() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        gate.tick(0, snap(), &mut target);
        assert_eq!(target.backlight_calls.as_slice(), &[50]);

        // Unchanged snapshot past the deadline: backlight off, no render
        assert!(!gate.tick(10_001, snap(), &mut target));
        assert_eq!(target.renders, 1);
        assert_eq!(target.backlight_calls.as_slice(), &[50, 0]);

        // And only once
        assert!(!gate.tick(12_000, snap(), &mut target));
        assert_eq!(target.backlight_calls.as_slice(), &[50, 0]);
    }

    #[test]
    fn expire_check_runs_even_on_dirty_tick() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        gate.tick(0, snap(), &mut target);

        // Past the deadline with a changed snapshot: off, then render relights
        let mut changed = snap();
        changed.brightness = 255;
        assert!(gate.tick(10_001, changed, &mut target));
        assert_eq!(target.backlight_calls.as_slice(), &[50, 0, 50]);
        assert_eq!(gate.backlight().deadline_ms(), 20_001);
    }

    #[test]
    fn render_after_timeout_relights_panel() {
        let mut gate = RenderGate::new(&test_config());
        let mut target = MockTarget::default();

        gate.tick(0, snap(), &mut target);
        gate.tick(10_001, snap(), &mut target);
        assert!(!gate.backlight().is_lit());

        gate.request_redraw();
        assert!(gate.tick(15_000, snap(), &mut target));
        assert!(gate.backlight().is_lit());
        assert_eq!(target.backlight_calls.as_slice(), &[50, 0, 50]);
    }
}
