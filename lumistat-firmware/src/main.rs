//! Lumistat - peripheral status display firmware
//!
//! RP2040 firmware that mirrors controller status onto a small ST7789
//! TFT. The render loop runs on core 1 so a slow frame never stalls the
//! control plane, and only pushes a frame when the published status
//! actually changed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lumistat_core::snapshot::AP_ADDR;
use lumistat_core::{RenderGate, ScheduleConfig};
use lumistat_display::StatusPanel;

use crate::config::{load_or_default, ConfigFlash, ConfigStore};
use crate::st7789::St7789Backend;

mod config;
mod st7789;
mod status;
mod tasks;

// Stack and executor for the render core (must live forever)
static mut CORE1_STACK: Stack<8192> = Stack::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Watchdog window; the panel task feeds every yield interval
const WATCHDOG_TIMEOUT_MS: u64 = 2_000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lumistat firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Device configuration from flash (defaults are seeded on first boot)
    let flash = ConfigFlash::new(p.FLASH, p.DMA_CH0);
    let mut store = ConfigStore::new(flash);
    let device_config = load_or_default(&mut store).await;
    info!(
        "Configuration loaded: backlight={} idle_timeout={}ms",
        device_config.backlight_level, device_config.idle_timeout_ms
    );

    // Display bus: TX-only SPI plus data/command, chip-select and reset lines
    // (T-Display wiring: SCLK=GPIO18, MOSI=GPIO19, DC=GPIO16, CS=GPIO17, RST=GPIO21)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let dc = Output::new(p.PIN_16, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let rst = Output::new(p.PIN_21, Level::High);

    // Backlight PWM on GPIO20, 8-bit duty, dark until the first frame
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = 255;
    pwm_config.compare_a = 0;
    let backlight = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, pwm_config);

    // Single backend instance owns the static framebuffer
    let mut backend = unsafe { St7789Backend::new(spi, dc, cs, rst, backlight) };
    backend.init().await;
    info!("Display initialized");

    // Boot snapshot: AP mode until the control plane publishes real state
    status::publish_network(device_config.label.as_str(), AP_ADDR, true, "");
    status::publish_led(128, 0, 0, 0);

    let panel = StatusPanel::new(backend);
    let gate = RenderGate::new(&device_config);
    let schedule = ScheduleConfig::new(device_config.tick_interval_ms);

    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));

    // Render loop runs on core 1; core 0 stays free for the control plane
    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                spawner
                    .spawn(tasks::panel::panel_task(panel, gate, schedule, watchdog))
                    .unwrap()
            });
        },
    );
    info!("Panel task pinned to core 1, firmware running");

    // Main task has nothing else to do - status updates arrive through
    // the publish hooks in the status module
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
