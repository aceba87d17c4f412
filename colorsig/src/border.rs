//! Background detection by sampling the four image edges
//!
//! Every edge is compared against the same anchor, the top-left pixel.
//! An edge is uniform when few of its pixels differ noticeably from the anchor.

use serde::{Deserialize, Serialize};

use crate::{config::BORDER_DISTANCE_THRESHOLD, distance_rgb, mean_color, Raster, RgbColor};

/// One of the four edges of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
	/// The first row
	Top,
	/// The last row
	Bottom,
	/// The first column
	Left,
	/// The last column
	Right,
}

impl Edge {
	/// All edges
	pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

	/// Number of pixels along this edge
	fn len(self, width: u32, height: u32) -> u32 {
		match self {
			Edge::Top | Edge::Bottom => width,
			Edge::Left | Edge::Right => height,
		}
	}

	/// Coordinates of the `i`-th pixel along this edge
	fn coordinates(self, i: u32, width: u32, height: u32) -> (u32, u32) {
		match self {
			Edge::Top => (i, 0),
			Edge::Bottom => (i, height - 1),
			Edge::Left => (0, i),
			Edge::Right => (width - 1, i),
		}
	}
}

/// Uniformity and mean color of a single edge
#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeSample {
	/// Fraction of edge pixels close to the anchor color
	uniformity: f64,
	/// Running mean color along the edge
	mean: RgbColor,
}

/// Result of [`detect_border`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderResult {
	/// Uniformity of the first row, in `0.0..=1.0`
	pub top: f64,
	/// Uniformity of the last row, in `0.0..=1.0`
	pub bottom: f64,
	/// Uniformity of the first column, in `0.0..=1.0`
	pub left: f64,
	/// Uniformity of the last column, in `0.0..=1.0`
	pub right: f64,
	/// Mean of the four edge mean colors
	pub color: RgbColor,
}

impl BorderResult {
	/// Uniformity of the given edge
	#[must_use]
	pub const fn uniformity(&self, edge: Edge) -> f64 {
		match edge {
			Edge::Top => self.top,
			Edge::Bottom => self.bottom,
			Edge::Left => self.left,
			Edge::Right => self.right,
		}
	}

	/// Whether every edge is at least `threshold` uniform, making the border color usable as background
	#[must_use]
	pub fn is_acceptable(&self, threshold: f64) -> bool {
		Edge::ALL.into_iter().all(|edge| self.uniformity(edge) >= threshold)
	}
}

/// Walk one edge, accumulating the running mean color and counting pixels far from the anchor
fn sample_edge(raster: &impl Raster, edge: Edge, anchor: RgbColor, threshold: f64) -> EdgeSample {
	let (width, height) = (raster.width(), raster.height());
	let len = edge.len(width, height);

	let (mean, nonuniform) = (0..len)
		.map(|i| {
			let (x, y) = edge.coordinates(i, width, height);
			raster.pixel(x, y)
		})
		.fold((anchor, 0_u32), |(mean, nonuniform), color| {
			let far = distance_rgb(color, anchor) > threshold;
			(mean_color(&[color, mean]), nonuniform + u32::from(far))
		});

	EdgeSample {
		uniformity: 1.0 - f64::from(nonuniform) / f64::from(len),
		mean,
	}
}

/// Estimate the background color of an image and how uniform each of its edges is
///
/// Edge pixels further than `threshold` from the top-left pixel count as non-uniform.
/// The raster must have at least one row and one column.
#[must_use]
pub fn detect_border(raster: &impl Raster, threshold: f64) -> BorderResult {
	debug_assert!(raster.width() > 0 && raster.height() > 0);

	let anchor = raster.pixel(0, 0);
	let [top, bottom, left, right] = Edge::ALL.map(|edge| sample_edge(raster, edge, anchor, threshold));

	BorderResult {
		top: top.uniformity,
		bottom: bottom.uniformity,
		left: left.uniformity,
		right: right.uniformity,
		color: mean_color(&[top.mean, left.mean, right.mean, bottom.mean]),
	}
}

/// [`detect_border`] with the standard threshold of `7.0`
#[must_use]
pub fn detect_border_default(raster: &impl Raster) -> BorderResult {
	detect_border(raster, BORDER_DISTANCE_THRESHOLD)
}
