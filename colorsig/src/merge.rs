//! Greedy merging of quantized clusters
//!
//! Only neighbors in the current list order are merge candidates, and every merged cluster is
//! appended to the end of the list. The outcome therefore depends on the input order;
//! it is a cheap heuristic rather than a globally optimal clustering.

use crate::{
	config::{MERGE_MAX_ITERATIONS, MERGE_TARGET_COUNT},
	distance_rgb, mean_color, RgbColor,
};

/// Index `i` of the adjacent pair `(i, i + 1)` with the smallest color difference, taking the first on ties
fn closest_adjacent_pair(clusters: &[(RgbColor, u32)]) -> Option<usize> {
	clusters
		.windows(2)
		.map(|pair| distance_rgb(pair[0].0, pair[1].0))
		.enumerate()
		.fold(None, |best: Option<(usize, f64)>, (i, dist)| match best {
			Some((_, min)) if min <= dist => best,
			_ => Some((i, dist)),
		})
		.map(|(i, _)| i)
}

/// Merge adjacent clusters until at most `target_count` remain or `max_iterations` merges have happened
///
/// A merged cluster has the unweighted (rounded) mean color of its two parts and the sum of their counts.
/// Lists already at or below `target_count` are returned unchanged.
#[must_use]
pub fn merge_with(mut clusters: Vec<(RgbColor, u32)>, target_count: usize, max_iterations: u32) -> Vec<(RgbColor, u32)> {
	let mut merges = 0;
	while clusters.len() > target_count && merges < max_iterations {
		let Some(i) = closest_adjacent_pair(&clusters) else {
			break;
		};

		let (second, second_count) = clusters.remove(i + 1);
		let (first, first_count) = clusters.remove(i);
		clusters.push((mean_color(&[first, second]), first_count + second_count));
		merges += 1;
	}

	if clusters.len() > target_count {
		tracing::debug!(clusters = clusters.len(), max_iterations, "cluster merging stopped at the iteration cap");
	}

	clusters
}

/// [`merge_with`] using a target of `5` clusters and at most `100` merges
#[must_use]
pub fn merge(clusters: Vec<(RgbColor, u32)>) -> Vec<(RgbColor, u32)> {
	merge_with(clusters, MERGE_TARGET_COUNT, MERGE_MAX_ITERATIONS)
}
