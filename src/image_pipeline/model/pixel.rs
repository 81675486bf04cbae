//! Normalized RGB pixel

use std::ops::{AddAssign, Div, Mul};

/// Scale between an 8-bit channel and its normalized value.
pub const DEPTH: f64 = 255.0;

/// RGB pixel with channels nominally in `[0, 1]`.
///
/// Arithmetic never clamps; filters clamp when their result has to stay
/// displayable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0.0, 0.0, 0.0);
    pub const WHITE: Pixel = Pixel::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Builds a pixel from 8-bit channels.
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f64 / DEPTH,
            green: green as f64 / DEPTH,
            blue: blue as f64 / DEPTH,
        }
    }

    /// Channels in on-disk BMP order.
    ///
    /// Each channel is `channel * 255` truncated, so `from_u8` followed by
    /// `to_bgr` returns the original bytes. Out of range values saturate.
    pub fn to_bgr(&self) -> [u8; 3] {
        [
            (self.blue * DEPTH) as u8,
            (self.green * DEPTH) as u8,
            (self.red * DEPTH) as u8,
        ]
    }

    pub fn from_bgr(bgr: [u8; 3]) -> Self {
        Self::from_u8(bgr[2], bgr[1], bgr[0])
    }

    /// Applies `f` to every channel.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }

    /// Combines this pixel with `other` channel by channel.
    pub fn zip_with(self, other: Pixel, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self {
            red: f(self.red, other.red),
            green: f(self.green, other.green),
            blue: f(self.blue, other.blue),
        }
    }

    pub fn clamped(self) -> Self {
        self.map(|c| c.clamp(0.0, 1.0))
    }
}

impl AddAssign for Pixel {
    fn add_assign(&mut self, other: Pixel) {
        self.red += other.red;
        self.green += other.green;
        self.blue += other.blue;
    }
}

impl<T: Into<f64>> Mul<T> for Pixel {
    type Output = Pixel;

    fn mul(self, n: T) -> Pixel {
        let n = n.into();
        self.map(|c| c * n)
    }
}

impl<T: Into<f64>> Div<T> for Pixel {
    type Output = Pixel;

    fn div(self, n: T) -> Pixel {
        let n = n.into();
        self.map(|c| c / n)
    }
}
