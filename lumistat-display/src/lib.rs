//! Display abstraction and status screen composition for Lumistat
//!
//! This crate provides:
//! - `DisplayBackend` trait for different panel types (TFT, OLED, ...)
//! - `Screen` character buffer for text-mode rendering
//! - Mode/palette name resolution with display-width truncation
//! - `StatusPanel`, the render capability the synchronizer draws through
//!
//! Backends implement the hardware-specific part (glyph drawing, bus
//! transfers, backlight control); everything above the backend works in
//! character cells and is host-testable.

#![no_std]

pub mod backend;
pub mod names;
pub mod screen;
pub mod status;

pub use backend::DisplayBackend;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use status::StatusPanel;
