//! Status panel task, pinned to core 1
//!
//! Runs the dirty-state render loop on a short yield cadence so the
//! watchdog keeps getting fed even when the panel itself only ticks
//! every couple of seconds. Disabling the panel pauses the tick but
//! never the yield, and any redraw request raised while disabled is
//! kept pending until the panel comes back.

use defmt::*;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Instant, Ticker};

use lumistat_core::{RenderGate, ScheduleConfig, TickDeadline};
use lumistat_display::StatusPanel;

use crate::st7789::St7789Backend;
use crate::status;

#[embassy_executor::task]
pub async fn panel_task(
    mut panel: StatusPanel<St7789Backend<'static>>,
    mut gate: RenderGate,
    schedule: ScheduleConfig,
    mut watchdog: Watchdog,
) {
    info!(
        "Panel task started (tick {}ms, yield {}ms)",
        schedule.tick_interval_ms, schedule.yield_interval_ms
    );

    let mut ticker = Ticker::every(Duration::from_millis(schedule.yield_interval_ms as u64));
    let mut deadline = TickDeadline::new(schedule.tick_interval_ms);
    let start = Instant::now();

    loop {
        // the yield is unconditional so the watchdog never starves
        ticker.next().await;
        watchdog.feed();

        if !status::panel_enabled() {
            continue;
        }

        let now_ms = start.elapsed().as_millis();
        if deadline.due(now_ms) {
            deadline.rearm(now_ms);

            if status::take_redraw_request() {
                gate.request_redraw();
            }
            let current = status::capture();
            if gate.tick(now_ms, current, &mut panel) {
                debug!("Status frame rendered");
            }
        }
    }
}
