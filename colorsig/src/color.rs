//! Color value types shared by every stage of the pipeline

use palette::{white_point::D65, Lab, Srgb, Xyz};
use serde::{Deserialize, Serialize};

/// CIE L*a*b* color relative to the D65 white point
///
/// Only ever produced by [`crate::to_lab`], so its fields carry the two-decimal rounding of the converter.
pub type LabColor = Lab<D65, f64>;

/// CIE XYZ color on the `0.0..=100.0` scale, relative to the D65 white point
pub type XyzColor = Xyz<D65, f64>;

/// An 8-bit sRGB color
///
/// Equality, hashing, and ordering all compare the exact channel triple (red first, then green, then blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RgbColor {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
}

impl RgbColor {
	/// Pure black
	pub const BLACK: Self = Self::new(0, 0, 0);

	/// Pure white
	pub const WHITE: Self = Self::new(255, 255, 255);

	/// Create a color from its three channels
	#[must_use]
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// The channels as an array in `[r, g, b]` order
	#[must_use]
	pub const fn channels(self) -> [u8; 3] {
		[self.r, self.g, self.b]
	}

	/// The value of a single channel
	#[must_use]
	pub const fn channel(self, channel: Channel) -> u8 {
		match channel {
			Channel::Red => self.r,
			Channel::Green => self.g,
			Channel::Blue => self.b,
		}
	}
}

impl From<[u8; 3]> for RgbColor {
	fn from([r, g, b]: [u8; 3]) -> Self {
		Self::new(r, g, b)
	}
}

impl From<Srgb<u8>> for RgbColor {
	fn from(srgb: Srgb<u8>) -> Self {
		Self::new(srgb.red, srgb.green, srgb.blue)
	}
}

impl From<RgbColor> for Srgb<u8> {
	fn from(color: RgbColor) -> Self {
		Srgb::new(color.r, color.g, color.b)
	}
}

/// One of the three RGB channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
	/// Red
	Red,
	/// Green
	Green,
	/// Blue
	Blue,
}

impl Channel {
	/// All channels, in tie-breaking preference order
	pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

/// Rounds half-way cases towards positive infinity, i.e. `floor(x + 0.5)`
pub(crate) fn round_half_up(x: f64) -> f64 {
	(x + 0.5).floor()
}

/// The channel-wise mean of the given colors, rounded to the nearest integer (half-way cases round up)
///
/// Returns black for an empty slice.
#[must_use]
pub fn mean_color(colors: &[RgbColor]) -> RgbColor {
	if colors.is_empty() {
		return RgbColor::BLACK;
	}

	#[allow(clippy::cast_precision_loss)]
	let n = colors.len() as f64;
	let mean = |channel| {
		let sum = colors.iter().map(|&color| u64::from(color.channel(channel))).sum::<u64>();
		// the mean of u8 values lies in 0.0..=255.0
		#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		{
			round_half_up(sum as f64 / n) as u8
		}
	};

	RgbColor::new(mean(Channel::Red), mean(Channel::Green), mean(Channel::Blue))
}
