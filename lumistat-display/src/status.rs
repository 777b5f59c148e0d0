//! Status screen composition
//!
//! Builds the panel rows from a status snapshot and hands them to the
//! backend. `StatusPanel` is the render capability the synchronizer in
//! `lumistat-core` draws through.

use core::fmt::Write;
use heapless::String;

use lumistat_core::{RenderTarget, StatusSnapshot};

use crate::backend::DisplayBackend;
use crate::names::{self, fit};
use crate::screen::{Screen, SCREEN_COLS};

/// Row layout of the status screen
pub const ROW_DEVICE_LABEL: usize = 0;
pub const ROW_NETWORK: usize = 1;
pub const ROW_ADDRESS: usize = 2;
pub const ROW_BRIGHTNESS: usize = 3;
pub const ROW_MODE: usize = 4;
pub const ROW_PALETTE: usize = 5;
pub const ROW_POWER: usize = 6;

/// Compose the status rows for a snapshot
///
/// - device label
/// - network identity (SSID, `~`-truncated)
/// - `IP:`/`AP IP:` dotted quad
/// - brightness percentage, or the AP password while in AP mode
/// - effect mode name
/// - palette name
/// - estimated current draw
pub fn compose(screen: &mut Screen, snapshot: &StatusSnapshot, label: &str) {
    screen.clear();

    screen.set_line(ROW_DEVICE_LABEL, fit(label, SCREEN_COLS).as_str());
    screen.set_line(
        ROW_NETWORK,
        fit(snapshot.network_label.as_str(), SCREEN_COLS).as_str(),
    );

    let mut line: String<SCREEN_COLS> = String::new();
    let [a, b, c, d] = snapshot.network_addr;
    if snapshot.ap_mode {
        let _ = write!(line, "AP IP: {}.{}.{}.{}", a, b, c, d);
    } else {
        let _ = write!(line, "IP: {}.{}.{}.{}", a, b, c, d);
    }
    screen.set_line(ROW_ADDRESS, line.as_str());

    line.clear();
    if snapshot.ap_mode {
        let _ = write!(line, "AP Pass: ");
        let remaining = SCREEN_COLS - line.len();
        let _ = line.push_str(fit(snapshot.ap_password.as_str(), remaining).as_str());
    } else {
        // Percent of full scale, rounded to the nearest whole point
        let pct = (snapshot.brightness as u32 * 100 + 127) / 255;
        let _ = write!(line, "Bright: {}%", pct);
    }
    screen.set_line(ROW_BRIGHTNESS, line.as_str());

    screen.set_line(ROW_MODE, names::mode_name(snapshot.mode_id).as_str());
    screen.set_line(ROW_PALETTE, names::palette_name(snapshot.palette_id).as_str());

    line.clear();
    let _ = write!(line, "{}mA est.", snapshot.power_draw_ma);
    screen.set_line(ROW_POWER, line.as_str());
}

/// Render capability over a display backend
///
/// Owns the screen buffer and the backend handle; created once at
/// startup and owned by the background display task.
pub struct StatusPanel<B: DisplayBackend> {
    backend: B,
    screen: Screen,
}

impl<B: DisplayBackend> StatusPanel<B> {
    /// Create a panel over the given backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            screen: Screen::new(),
        }
    }

    /// Access the composed screen, for inspection
    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl<B: DisplayBackend> RenderTarget for StatusPanel<B> {
    fn render(&mut self, snapshot: &StatusSnapshot, label: &str) {
        compose(&mut self.screen, snapshot, label);
        self.backend.draw_screen(&self.screen);
    }

    fn set_backlight(&mut self, level: u16) {
        self.backend.set_backlight(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap() -> StatusSnapshot {
        let mut s = StatusSnapshot::default();
        let _ = s.network_label.push_str("HomeNet");
        s.network_addr = [192, 168, 1, 42];
        s.brightness = 128;
        s.mode_id = 9;
        s.palette_id = 8;
        s.power_draw_ma = 350;
        s
    }

    #[test]
    fn station_mode_rows() {
        let mut screen = Screen::new();
        compose(&mut screen, &snap(), "Lumistat");

        assert_eq!(screen.get_line(ROW_DEVICE_LABEL), Some("Lumistat"));
        assert_eq!(screen.get_line(ROW_NETWORK), Some("HomeNet"));
        assert_eq!(screen.get_line(ROW_ADDRESS), Some("IP: 192.168.1.42"));
        assert_eq!(screen.get_line(ROW_BRIGHTNESS), Some("Bright: 50%"));
        assert_eq!(screen.get_line(ROW_MODE), Some("Rainbow"));
        assert_eq!(screen.get_line(ROW_PALETTE), Some("Lava"));
        assert_eq!(screen.get_line(ROW_POWER), Some("350mA est."));
    }

    #[test]
    fn ap_mode_shows_password_instead_of_brightness() {
        let mut s = snap();
        s.ap_mode = true;
        s.network_addr = [4, 3, 2, 1];
        let _ = s.ap_password.push_str("lumipass42");

        let mut screen = Screen::new();
        compose(&mut screen, &s, "Lumistat");

        assert_eq!(screen.get_line(ROW_ADDRESS), Some("AP IP: 4.3.2.1"));
        assert_eq!(screen.get_line(ROW_BRIGHTNESS), Some("AP Pass: lumipass42"));
    }

    #[test]
    fn long_ssid_is_marked_truncated() {
        let mut s = snap();
        s.network_label.clear();
        let _ = s.network_label.push_str("A Network Name Beyond Width");

        let mut screen = Screen::new();
        compose(&mut screen, &s, "Lumistat");

        let row = screen.get_line(ROW_NETWORK).unwrap();
        assert_eq!(row.len(), SCREEN_COLS);
        assert!(row.ends_with('~'));
    }

    #[test]
    fn panel_draws_through_backend() {
        struct CountingBackend {
            frames: usize,
            levels: heapless::Vec<u16, 4>,
        }

        impl DisplayBackend for CountingBackend {
            fn draw_screen(&mut self, _screen: &Screen) {
                self.frames += 1;
            }
            fn set_backlight(&mut self, level: u16) {
                let _ = self.levels.push(level);
            }
        }

        let mut panel = StatusPanel::new(CountingBackend {
            frames: 0,
            levels: heapless::Vec::new(),
        });
        panel.render(&snap(), "Lumistat");
        panel.set_backlight(50);

        assert_eq!(panel.backend.frames, 1);
        assert_eq!(panel.backend.levels.as_slice(), &[50]);
        assert_eq!(panel.screen().get_line(ROW_NETWORK), Some("HomeNet"));
    }
}
