//! ST7789 text backend for the T-Display style 135x240 TFT
//!
//! Blocking SPI driver with a single RGB565 framebuffer. The panel is
//! driven in landscape (240x135); rows of text are drawn into the
//! framebuffer with embedded-graphics and flushed as one full-screen
//! transfer. Backlight is a PWM output, 8-bit duty.
//!
//! Transport errors are logged and swallowed: a lost frame is simply
//! replaced by the next dirty tick.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Timer;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use profont::PROFONT_14_POINT;

use lumistat_display::{DisplayBackend, Screen, SCREEN_ROWS};

/// Display dimensions in landscape orientation
pub const WIDTH: usize = 240;
pub const HEIGHT: usize = 135;
const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

/// Panel window offsets into the ST7789 240x320 RAM (landscape)
const X_OFFSET: u16 = 40;
const Y_OFFSET: u16 = 53;

/// Vertical pitch per text row (PROFONT_14 is 10x18)
const ROW_PITCH: usize = 19;

// ST7789 commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

// MADCTL: row/column exchange + column order for landscape, port on the left
const MADCTL_LANDSCAPE: u8 = 0x60;

/// Per-row text colors (device label down to power draw)
const ROW_COLORS: [Rgb565; SCREEN_ROWS] = [
    Rgb565::WHITE,
    Rgb565::YELLOW,
    Rgb565::CSS_GREEN_YELLOW,
    Rgb565::GREEN,
    Rgb565::CSS_SKY_BLUE,
    Rgb565::BLUE,
    Rgb565::CSS_VIOLET,
];

static mut FRAMEBUFFER: [u8; BUFFER_SIZE] = [0u8; BUFFER_SIZE];

/// ST7789 panel with PWM backlight
pub struct St7789Backend<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    rst: Output<'d>,
    backlight: Pwm<'d>,
    framebuffer: &'static mut [u8; BUFFER_SIZE],
}

impl<'d> St7789Backend<'d> {
    /// Create the backend over the display bus and backlight PWM
    ///
    /// # Safety
    /// Must only be called once; the static framebuffer is owned by this
    /// instance.
    pub unsafe fn new(
        spi: Spi<'d, SPI0, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        rst: Output<'d>,
        backlight: Pwm<'d>,
    ) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            backlight,
            framebuffer: unsafe { &mut *core::ptr::addr_of_mut!(FRAMEBUFFER) },
        }
    }

    /// Hardware reset and panel init sequence
    pub async fn init(&mut self) {
        self.rst.set_low();
        Timer::after_millis(20).await;
        self.rst.set_high();
        Timer::after_millis(120).await;

        self.command(SWRESET, &[]);
        Timer::after_millis(150).await;
        self.command(SLPOUT, &[]);
        Timer::after_millis(120).await;

        self.command(COLMOD, &[0x55]); // 16bpp
        self.command(MADCTL, &[MADCTL_LANDSCAPE]);
        self.command(INVON, &[]); // panel ships inverted
        self.command(NORON, &[]);
        self.command(DISPON, &[]);
        Timer::after_millis(20).await;

        self.framebuffer.fill(0);
        self.flush();
        info!("ST7789 initialized ({}x{})", WIDTH, HEIGHT);
    }

    /// Send the framebuffer to the panel
    fn flush(&mut self) {
        let x1 = X_OFFSET + WIDTH as u16 - 1;
        let y1 = Y_OFFSET + HEIGHT as u16 - 1;
        self.command(
            CASET,
            &[
                (X_OFFSET >> 8) as u8,
                X_OFFSET as u8,
                (x1 >> 8) as u8,
                x1 as u8,
            ],
        );
        self.command(
            RASET,
            &[
                (Y_OFFSET >> 8) as u8,
                Y_OFFSET as u8,
                (y1 >> 8) as u8,
                y1 as u8,
            ],
        );

        self.cs.set_low();
        self.dc.set_low();
        self.write_spi(&[RAMWR]);
        self.dc.set_high();
        if self.spi.blocking_write(self.framebuffer.as_slice()).is_err() {
            warn!("Framebuffer flush failed");
        }
        self.cs.set_high();
    }

    /// Send a command with optional parameter bytes
    fn command(&mut self, cmd: u8, data: &[u8]) {
        self.cs.set_low();
        self.dc.set_low();
        self.write_spi(&[cmd]);
        if !data.is_empty() {
            self.dc.set_high();
            self.write_spi(data);
        }
        self.cs.set_high();
    }

    fn write_spi(&mut self, bytes: &[u8]) {
        if self.spi.blocking_write(bytes).is_err() {
            warn!("SPI write failed");
        }
    }
}

impl OriginDimensions for St7789Backend<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for St7789Backend<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                let idx = (point.y as usize * WIDTH + point.x as usize) * 2;
                let raw = RawU16::from(color).into_inner().to_be_bytes();
                self.framebuffer[idx] = raw[0];
                self.framebuffer[idx + 1] = raw[1];
            }
        }
        Ok(())
    }
}

impl DisplayBackend for St7789Backend<'_> {
    fn draw_screen(&mut self, screen: &Screen) {
        self.framebuffer.fill(0);

        for (row, line) in screen.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let style = MonoTextStyle::new(&PROFONT_14_POINT, ROW_COLORS[row]);
            let y = (row * ROW_PITCH) as i32 + 1;
            let _ = Text::with_baseline(line, Point::new(1, y), style, Baseline::Top).draw(self);
        }

        self.flush();
    }

    fn set_backlight(&mut self, level: u16) {
        let mut config = PwmConfig::default();
        config.top = 255;
        config.compare_a = level.min(255);
        self.backlight.set_config(&config);
        trace!("Backlight set to {}", level);
    }
}
