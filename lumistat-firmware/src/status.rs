//! Shared controller status and cross-core hooks
//!
//! The rest of the firmware (network stack, LED engine) owns the values
//! shown on the panel. It publishes them here; the display task on core 1
//! captures an immutable snapshot once per tick.
//!
//! The redraw-request flag is the only state written from one core and
//! read from the other. Relaxed ordering is enough: a stale read just
//! delays the redraw by one tick, and any functional change also changes
//! the snapshot itself.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicBool, Ordering};

use lumistat_core::StatusSnapshot;

/// Current controller state, written by producer tasks
static CURRENT: Mutex<CriticalSectionRawMutex, RefCell<StatusSnapshot>> =
    Mutex::new(RefCell::new(StatusSnapshot::new()));

/// Redraw requested by a notification hook since the last render
static REDRAW_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Panel enabled; when false the display task skips ticks but keeps
/// its liveness cadence
static PANEL_ENABLED: AtomicBool = AtomicBool::new(true);

/// Capture an immutable snapshot of the current state
pub fn capture() -> StatusSnapshot {
    CURRENT.lock(|cell| cell.borrow().clone())
}

/// Publish new network identity values
pub fn publish_network(label: &str, addr: [u8; 4], ap_mode: bool, ap_password: &str) {
    CURRENT.lock(|cell| {
        let mut state = cell.borrow_mut();
        state.network_label.clear();
        let _ = state.network_label.push_str(label);
        state.network_addr = addr;
        state.ap_mode = ap_mode;
        state.ap_password.clear();
        let _ = state.ap_password.push_str(ap_password);
    });
}

/// Publish new LED engine values
pub fn publish_led(brightness: u8, mode_id: u8, palette_id: u8, power_draw_ma: u32) {
    CURRENT.lock(|cell| {
        let mut state = cell.borrow_mut();
        state.brightness = brightness;
        state.mode_id = mode_id;
        state.palette_id = palette_id;
        state.power_draw_ma = power_draw_ma;
    });
}

/// Request a panel redraw on the next scheduled tick
// Entry point for the control plane; unused until one is wired up
#[allow(dead_code)]
pub fn request_redraw() {
    REDRAW_REQUESTED.store(true, Ordering::Relaxed);
}

/// Consume a pending redraw request, if any
pub fn take_redraw_request() -> bool {
    REDRAW_REQUESTED.swap(false, Ordering::Relaxed)
}

/// Notification hook: network (re-)connected
#[allow(dead_code)]
pub fn on_reconnected() {
    request_redraw();
}

/// Notification hook: controller state changed (mode, preset, ...)
#[allow(dead_code)]
pub fn on_state_changed() {
    request_redraw();
}

/// Enable or disable panel updates (host toggle)
#[allow(dead_code)]
pub fn set_panel_enabled(enabled: bool) {
    PANEL_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether panel updates are currently enabled
pub fn panel_enabled() -> bool {
    PANEL_ENABLED.load(Ordering::Relaxed)
}
