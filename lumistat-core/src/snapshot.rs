//! Point-in-time copy of the controller state shown on the panel
//!
//! A snapshot is captured once per tick, compared against the last
//! rendered snapshot, and either discarded (no change) or stored as the
//! new render baseline.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum network label (SSID) length
pub const MAX_SSID_LEN: usize = 32;

/// Maximum AP password length
pub const MAX_PASSWORD_LEN: usize = 32;

/// IP address reported while the soft-AP is active
pub const AP_ADDR: [u8; 4] = [4, 3, 2, 1];

/// Observable controller state relevant to the panel
///
/// Compared by field equality; all fields participate. String fields
/// compare full content, not the truncated display width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSnapshot {
    /// Connected SSID, or the AP SSID while in AP mode
    pub network_label: String<MAX_SSID_LEN>,
    /// IPv4 address ([`AP_ADDR`] while in AP mode)
    pub network_addr: [u8; 4],
    /// Soft-AP active
    pub ap_mode: bool,
    /// AP password (shown instead of brightness in AP mode)
    pub ap_password: String<MAX_PASSWORD_LEN>,
    /// LED strip brightness (0-255)
    pub brightness: u8,
    /// Active effect mode id
    pub mode_id: u8,
    /// Active palette id
    pub palette_id: u8,
    /// Estimated strip current draw in mA
    pub power_draw_ma: u32,
}

impl StatusSnapshot {
    /// Empty snapshot, usable in const/static contexts
    pub const fn new() -> Self {
        Self {
            network_label: String::new(),
            network_addr: [0, 0, 0, 0],
            ap_mode: false,
            ap_password: String::new(),
            brightness: 0,
            mode_id: 0,
            palette_id: 0,
            power_draw_ma: 0,
        }
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
