//! Board-agnostic core logic for the Lumistat status panel
//!
//! This crate contains all panel logic that does not depend on specific
//! hardware or on the async runtime:
//!
//! - Snapshot type for the observed controller state
//! - Change detection (is the rendered output stale?)
//! - Render gate (one tick of the synchronizer)
//! - Backlight idle-timeout management
//! - Tick cadence bookkeeping
//! - Device configuration types
//!
//! Timestamps cross this crate's boundary as `u64` milliseconds so the
//! logic stays testable on the host without an embedded time driver.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod detect;
pub mod power;
pub mod schedule;
pub mod snapshot;
pub mod sync;

pub use config::DeviceConfig;
pub use detect::needs_redraw;
pub use power::BacklightManager;
pub use schedule::{ScheduleConfig, TickDeadline};
pub use snapshot::StatusSnapshot;
pub use sync::{RenderGate, RenderTarget};
