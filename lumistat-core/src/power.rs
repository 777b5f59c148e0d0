//! Backlight idle-timeout management
//!
//! The panel backlight is lit at a configured level after every render
//! and withdrawn once no render has happened for the configured timeout.
//! The level is an independent panel setting; it does not track the LED
//! strip brightness. The backlight never turns back on without a render.

/// Default backlight level after a render (0-255 PWM duty)
pub const DEFAULT_BACKLIGHT_LEVEL: u16 = 50;

/// Default idle timeout in milliseconds
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 10_000;

/// Tracks the backlight level and its idle deadline
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightManager {
    /// Level applied after a render
    level: u16,
    /// Idle timeout after the last render
    timeout_ms: u32,
    /// Monotonic deadline; backlight goes dark once now passes this
    deadline_ms: u64,
    /// Backlight currently nonzero
    lit: bool,
}

impl BacklightManager {
    /// Create a manager with the given post-render level and idle timeout
    pub const fn new(level: u16, timeout_ms: u32) -> Self {
        Self {
            level,
            timeout_ms,
            deadline_ms: 0,
            lit: false,
        }
    }

    /// A render just happened: push the deadline forward
    ///
    /// Returns the level to apply to the backlight.
    pub fn on_rendered(&mut self, now_ms: u64) -> u16 {
        self.deadline_ms = now_ms + self.timeout_ms as u64;
        self.lit = self.level > 0;
        self.level
    }

    /// Check the idle deadline
    ///
    /// Returns `Some(0)` exactly once when the deadline has passed while
    /// the backlight is lit; `None` otherwise (idempotent when already
    /// dark).
    pub fn on_expire(&mut self, now_ms: u64) -> Option<u16> {
        if self.lit && now_ms >= self.deadline_ms {
            self.lit = false;
            Some(0)
        } else {
            None
        }
    }

    /// Backlight currently lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Current idle deadline in milliseconds
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    /// Configured post-render level
    pub fn level(&self) -> u16 {
        self.level
    }
}

impl Default for BacklightManager {
    fn default() -> Self {
        Self::new(DEFAULT_BACKLIGHT_LEVEL, DEFAULT_IDLE_TIMEOUT_MS)
    }
}
