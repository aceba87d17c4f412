//! Scoring a color distribution against a reference palette
//!
//! Lower scores are better: a score is the share-weighted mean color difference between the
//! distribution's colors and one palette entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{distance_rgb, ColorDistribution, Palette};

/// Score given to every palette entry when a distribution has no usable color data
///
/// Such images rank below every scored image.
pub const NO_COLOR_DATA_SCORE: f64 = f64::MAX;

/// Palette entry name to score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
	/// Scores keyed by entry name
	scores: BTreeMap<String, f64>,
}

impl ScoreMap {
	/// The score of the named entry
	#[must_use]
	pub fn get(&self, name: &str) -> Option<f64> {
		self.scores.get(name).copied()
	}

	/// Number of scored entries
	#[must_use]
	pub fn len(&self) -> usize {
		self.scores.len()
	}

	/// Whether no entries were scored
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.scores.is_empty()
	}

	/// All `(name, score)` pairs ordered by name
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.scores.iter().map(|(name, &score)| (name.as_str(), score))
	}

	/// All `(name, score)` pairs from best (lowest) to worst, ties ordered by name
	#[must_use]
	pub fn ranked(&self) -> Vec<(&str, f64)> {
		let mut ranked = self.iter().collect::<Vec<_>>();
		// sort is stable and `iter` is ordered by name
		ranked.sort_by(|(_, x), (_, y)| f64::total_cmp(x, y));
		ranked
	}

	/// The best matching entry, if any
	#[must_use]
	pub fn best_match(&self) -> Option<(&str, f64)> {
		self.ranked().into_iter().next()
	}
}

impl FromIterator<(String, f64)> for ScoreMap {
	fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
		Self { scores: iter.into_iter().collect() }
	}
}

/// Score a distribution against every entry of a palette
///
/// If the distribution is empty, every entry gets [`NO_COLOR_DATA_SCORE`].
#[must_use]
pub fn score(distribution: &ColorDistribution, palette: &Palette) -> ScoreMap {
	let total = distribution.total_share();

	palette
		.entries()
		.iter()
		.map(|entry| {
			let score = if total == 0 {
				NO_COLOR_DATA_SCORE
			} else {
				#[allow(clippy::cast_precision_loss)]
				let total = total as f64;
				distribution
					.entries()
					.iter()
					.map(|cluster| f64::from(cluster.share) / total * distance_rgb(cluster.color, entry.color))
					.sum()
			};

			(entry.name.clone(), score)
		})
		.collect()
}
