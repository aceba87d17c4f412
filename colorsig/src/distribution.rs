//! The dominant-color signature of an image

use serde::{Deserialize, Serialize};

use crate::RgbColor;

/// A representative color and the number of pixels it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorDistributionEntry {
	/// Representative color
	pub color: RgbColor,
	/// Number of pixels represented by this color
	pub share: u32,
}

/// Representative colors of an image, ordered by descending share
///
/// Entries with equal shares are ordered by ascending color, so the order is fully deterministic.
/// Entries never have a share of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorDistributionEntry>", into = "Vec<ColorDistributionEntry>")]
pub struct ColorDistribution {
	/// Sorted entries
	entries: Vec<ColorDistributionEntry>,
}

impl ColorDistribution {
	/// Build a distribution from `(color, share)` pairs, dropping pairs with a share of zero
	#[must_use]
	pub fn new(clusters: impl IntoIterator<Item = (RgbColor, u32)>) -> Self {
		let mut entries = clusters
			.into_iter()
			.filter(|&(_, share)| share > 0)
			.map(|(color, share)| ColorDistributionEntry { color, share })
			.collect::<Vec<_>>();

		entries.sort_by(|x, y| y.share.cmp(&x.share).then(x.color.cmp(&y.color)));

		Self { entries }
	}

	/// The entries, largest share first
	#[must_use]
	pub fn entries(&self) -> &[ColorDistributionEntry] {
		&self.entries
	}

	/// Number of entries
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no usable color data was found
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sum of all shares
	#[must_use]
	pub fn total_share(&self) -> u64 {
		self.entries.iter().map(|entry| u64::from(entry.share)).sum()
	}

	/// The entry with the largest share
	#[must_use]
	pub fn dominant(&self) -> Option<ColorDistributionEntry> {
		self.entries.first().copied()
	}
}

impl From<Vec<ColorDistributionEntry>> for ColorDistribution {
	fn from(entries: Vec<ColorDistributionEntry>) -> Self {
		Self::new(entries.into_iter().map(|entry| (entry.color, entry.share)))
	}
}

impl From<ColorDistribution> for Vec<ColorDistributionEntry> {
	fn from(distribution: ColorDistribution) -> Self {
		distribution.entries
	}
}

impl<'a> IntoIterator for &'a ColorDistribution {
	type Item = &'a ColorDistributionEntry;
	type IntoIter = std::slice::Iter<'a, ColorDistributionEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
