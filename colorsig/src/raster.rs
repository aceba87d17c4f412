//! Read-only access to decoded image pixels

use image::RgbImage;

use crate::RgbColor;

/// A decoded image with at least one row and one column
///
/// Alpha stripping and channel packing are the decoder's job; a raster only hands out 8-bit RGB triples.
pub trait Raster {
	/// Number of columns
	fn width(&self) -> u32;

	/// Number of rows
	fn height(&self) -> u32;

	/// The color at column `x` and row `y`
	///
	/// Callers only ask for coordinates inside the image.
	fn pixel(&self, x: u32, y: u32) -> RgbColor;

	/// All pixels in row-major order
	fn pixels(&self) -> Vec<RgbColor> {
		let (width, height) = (self.width(), self.height());
		(0..height)
			.flat_map(|y| (0..width).map(move |x| (x, y)))
			.map(|(x, y)| self.pixel(x, y))
			.collect()
	}
}

impl Raster for RgbImage {
	fn width(&self) -> u32 {
		RgbImage::width(self)
	}

	fn height(&self) -> u32 {
		RgbImage::height(self)
	}

	fn pixel(&self, x: u32, y: u32) -> RgbColor {
		RgbColor::from(self.get_pixel(x, y).0)
	}

	fn pixels(&self) -> Vec<RgbColor> {
		self.as_raw()
			.chunks_exact(3)
			.map(|rgb| RgbColor::new(rgb[0], rgb[1], rgb[2]))
			.collect()
	}
}

impl<R: Raster + ?Sized> Raster for &R {
	fn width(&self) -> u32 {
		(**self).width()
	}

	fn height(&self) -> u32 {
		(**self).height()
	}

	fn pixel(&self, x: u32, y: u32) -> RgbColor {
		(**self).pixel(x, y)
	}

	fn pixels(&self) -> Vec<RgbColor> {
		(**self).pixels()
	}
}
