//! Display backend trait
//!
//! The hardware-specific half of the panel: glyph drawing and backlight
//! control. Calls are fire-and-forget; a frame that fails to reach the
//! panel is overwritten by the next dirty tick, so implementations log
//! transport errors instead of surfacing them.

use crate::screen::Screen;

/// Hardware-agnostic interface for text-mode status panels
pub trait DisplayBackend {
    /// Draw a full screen buffer, replacing the previous frame
    fn draw_screen(&mut self, screen: &Screen);

    /// Set the backlight level (0 = off, 255 = full)
    fn set_backlight(&mut self, level: u16);
}
