//! Median cut quantization of foreground pixels
//!
//! Each pass splits every bucket along its widest channel.
//! The split keeps `[0, n/2 - 1)` and `[n/2, n - 1)` of the sorted bucket,
//! so the two elements at `n/2 - 1` and `n - 1` are dropped on every split.
//! Small buckets can therefore end up empty; they collapse to black with a count of zero.

use crate::{
	color::Channel,
	config::{QUANTIZER_BUCKET_TARGET, QUANTIZER_MAX_ITERATIONS},
	distance_rgb, RgbColor,
};

/// Width of the value range of `channel` over the bucket
fn channel_range(bucket: &[RgbColor], channel: Channel) -> u8 {
	let values = bucket.iter().map(|color| color.channel(channel));
	let min = values.clone().min().unwrap_or(0);
	let max = values.max().unwrap_or(0);
	max - min
}

/// The channel with the widest range, preferring red, then green, then blue on ties
fn dominant_channel(bucket: &[RgbColor]) -> (Channel, u8) {
	Channel::ALL
		.into_iter()
		.map(|channel| (channel, channel_range(bucket, channel)))
		.fold((Channel::Red, 0), |best, candidate| if candidate.1 > best.1 { candidate } else { best })
}

/// Run a single median cut pass, returning whether any bucket was split
///
/// Unsplit buckets keep their relative order and the halves of each split bucket are appended after them.
fn split_pass(buckets: Vec<Vec<RgbColor>>) -> (Vec<Vec<RgbColor>>, bool) {
	let mut kept = Vec::with_capacity(buckets.len() * 2);
	let mut halves = Vec::new();

	for mut bucket in buckets {
		let (channel, range) = dominant_channel(&bucket);
		// buckets of a single color are already as fine as they can get
		if bucket.len() <= 1 || range == 0 {
			kept.push(bucket);
			continue;
		}

		bucket.sort_by_key(|color| color.channel(channel));

		let n = bucket.len();
		let mid = n / 2;
		halves.push(bucket[..(mid - 1)].to_vec());
		halves.push(bucket[mid..(n - 1)].to_vec());
	}

	let split = !halves.is_empty();
	kept.append(&mut halves);
	(kept, split)
}

/// Collapse a bucket to its truncated channel means and member count
///
/// The count saturates at `u32::MAX`.
fn collapse(bucket: &[RgbColor]) -> (RgbColor, u32) {
	if bucket.is_empty() {
		return (RgbColor::BLACK, 0);
	}

	let n = bucket.len() as u64;
	let mean = |channel| {
		let sum = bucket.iter().map(|color| u64::from(color.channel(channel))).sum::<u64>();
		// the mean of u8 values is <= u8::MAX
		u8::try_from(sum / n).unwrap_or(u8::MAX)
	};

	let count = u32::try_from(bucket.len()).unwrap_or(u32::MAX);
	(RgbColor::new(mean(Channel::Red), mean(Channel::Green), mean(Channel::Blue)), count)
}

/// Quantize pixels into weighted representative colors using median cut
///
/// Pixels within `exclusion_threshold` of `excluded` (typically the detected background) are dropped first.
/// Splitting stops once there are at least `bucket_target` buckets, after `max_iterations` passes,
/// or when no bucket can be split any further. Reaching `max_iterations` is not an error;
/// the buckets found so far are returned.
///
/// Returns one `(color, count)` pair per bucket, in bucket order.
#[must_use]
pub fn quantize_with(
	pixels: &[RgbColor],
	excluded: RgbColor,
	exclusion_threshold: f64,
	bucket_target: usize,
	max_iterations: u32,
) -> Vec<(RgbColor, u32)> {
	let foreground = pixels
		.iter()
		.copied()
		.filter(|&color| distance_rgb(color, excluded) > exclusion_threshold)
		.collect::<Vec<_>>();

	if foreground.is_empty() {
		return Vec::new();
	}

	let mut buckets = vec![foreground];
	let mut iterations = 0;
	while buckets.len() < bucket_target && iterations < max_iterations {
		let (next, split) = split_pass(buckets);
		buckets = next;
		iterations += 1;
		tracing::trace!(iteration = iterations, buckets = buckets.len(), "median cut pass");

		if !split {
			break;
		}
	}

	if buckets.len() < bucket_target && iterations == max_iterations {
		tracing::debug!(buckets = buckets.len(), max_iterations, "median cut stopped at the iteration cap");
	}

	buckets.iter().map(|bucket| collapse(bucket)).collect()
}

/// [`quantize_with`] using a bucket target of `32` and at most `100` passes
#[must_use]
pub fn quantize(pixels: &[RgbColor], excluded: RgbColor, exclusion_threshold: f64) -> Vec<(RgbColor, u32)> {
	quantize_with(pixels, excluded, exclusion_threshold, QUANTIZER_BUCKET_TARGET, QUANTIZER_MAX_ITERATIONS)
}

#[cfg(test)]
mod tests {
	use super::*;
	use itertools::iproduct;

	const RED: RgbColor = RgbColor::new(219, 40, 20);

	#[test]
	fn single_color_is_one_bucket() {
		let pixels = vec![RED; 37];
		assert_eq!(quantize(&pixels, RgbColor::WHITE, 7.0), vec![(RED, 37)]);
	}

	#[test]
	fn background_is_excluded() {
		let mut pixels = vec![RgbColor::WHITE; 20];
		pixels.extend([RgbColor::new(250, 250, 250), RgbColor::new(245, 246, 247)]);
		pixels.extend([RED; 4]);

		assert_eq!(quantize(&pixels, RgbColor::WHITE, 7.0), vec![(RED, 4)]);
	}

	#[test]
	fn only_background_gives_nothing() {
		let pixels = vec![RgbColor::WHITE; 16];
		assert!(quantize(&pixels, RgbColor::WHITE, 7.0).is_empty());
		assert!(quantize(&[], RgbColor::WHITE, 7.0).is_empty());
	}

	#[test]
	fn dominant_channel_prefers_red_then_green() {
		let bucket = [RgbColor::new(0, 0, 0), RgbColor::new(10, 10, 10)];
		assert_eq!(dominant_channel(&bucket), (Channel::Red, 10));

		let bucket = [RgbColor::new(0, 0, 0), RgbColor::new(5, 10, 10)];
		assert_eq!(dominant_channel(&bucket), (Channel::Green, 10));

		let bucket = [RgbColor::new(0, 0, 0), RgbColor::new(5, 5, 10)];
		assert_eq!(dominant_channel(&bucket), (Channel::Blue, 10));
	}

	#[test]
	fn split_drops_boundary_elements() {
		let bucket = (0..6).map(|r| RgbColor::new(r * 10, 0, 0)).rev().collect::<Vec<_>>();

		let (buckets, split) = split_pass(vec![bucket]);

		assert!(split);
		assert_eq!(
			buckets,
			vec![
				// [0, 2)
				vec![RgbColor::new(0, 0, 0), RgbColor::new(10, 0, 0)],
				// [3, 5)
				vec![RgbColor::new(30, 0, 0), RgbColor::new(40, 0, 0)],
			]
		);
	}

	#[test]
	fn small_buckets_split_into_empty_halves() {
		let bucket = vec![RgbColor::new(0, 0, 0), RgbColor::new(0, 0, 9)];
		let (buckets, split) = split_pass(vec![bucket]);
		assert!(split);
		assert_eq!(buckets, vec![Vec::new(), Vec::new()]);
	}

	#[test]
	fn unsplit_buckets_come_first() {
		let single = vec![RED];
		let uniform = vec![RgbColor::WHITE; 3];
		let varied = (0..4).map(|g| RgbColor::new(0, g * 50, 0)).collect::<Vec<_>>();

		let (buckets, _) = split_pass(vec![varied, single.clone(), uniform.clone()]);

		assert_eq!(buckets.len(), 4);
		assert_eq!(buckets[0], single);
		assert_eq!(buckets[1], uniform);
		assert_eq!(buckets[2], vec![RgbColor::new(0, 0, 0)]);
		assert_eq!(buckets[3], vec![RgbColor::new(0, 100, 0)]);
	}

	#[test]
	fn empty_bucket_collapses_to_black() {
		assert_eq!(collapse(&[]), (RgbColor::BLACK, 0));
	}

	#[test]
	fn collapse_truncates() {
		let bucket = [RgbColor::new(1, 2, 3), RgbColor::new(2, 3, 5)];
		assert_eq!(collapse(&bucket), (RgbColor::new(1, 2, 4), 2));
	}

	#[test]
	fn collapse_large_bright_bucket() {
		// 4200x4200 pixels of 250 sum to more than u32::MAX
		let bucket = vec![RgbColor::new(250, 250, 250); 4200 * 4200];
		assert_eq!(collapse(&bucket), (RgbColor::new(250, 250, 250), 17_640_000));
	}

	#[test]
	fn exclusion_threshold_is_inclusive() {
		let near = RgbColor::new(240, 240, 240);
		let threshold = distance_rgb(near, RgbColor::WHITE);
		let pixels = [near, near, RED];

		assert_eq!(quantize(&pixels, RgbColor::WHITE, threshold), vec![(RED, 1)]);
		// just below the distance, the pixel counts as foreground
		let kept = quantize_with(&pixels, RgbColor::WHITE, threshold - 1e-9, QUANTIZER_BUCKET_TARGET, 0);
		assert_eq!(kept, vec![(RgbColor::new(233, 173, 166), 3)]);
	}

	fn gradient() -> Vec<RgbColor> {
		iproduct!((0..=255).step_by(15), (0..=255).step_by(15), (0..=255).step_by(85))
			.map(|(r, g, b)| RgbColor::new(r, g, b))
			.collect()
	}

	#[test]
	fn reaches_bucket_target() {
		let result = quantize(&gradient(), RgbColor::WHITE, 7.0);
		assert!(result.len() >= QUANTIZER_BUCKET_TARGET);
		assert!(result.iter().map(|&(_, n)| n).sum::<u32>() > 0);
	}

	#[test]
	fn iteration_cap_limits_bucket_count() {
		let pixels = gradient();

		let one_pass = quantize_with(&pixels, RgbColor::WHITE, 7.0, QUANTIZER_BUCKET_TARGET, 1);
		assert_eq!(one_pass.len(), 2);

		let two_passes = quantize_with(&pixels, RgbColor::WHITE, 7.0, QUANTIZER_BUCKET_TARGET, 2);
		assert_eq!(two_passes.len(), 4);

		let none = quantize_with(&pixels, RgbColor::WHITE, 7.0, QUANTIZER_BUCKET_TARGET, 0);
		assert_eq!(none.len(), 1);
	}

	#[test]
	fn counts_shrink_by_two_per_split() {
		let pixels = gradient();
		let foreground = pixels
			.iter()
			.filter(|&&color| distance_rgb(color, RgbColor::WHITE) > 7.0)
			.count();

		let one_pass = quantize_with(&pixels, RgbColor::WHITE, 7.0, QUANTIZER_BUCKET_TARGET, 1);
		let total = one_pass.iter().map(|&(_, n)| n as usize).sum::<usize>();
		assert_eq!(total, foreground - 2);
	}
}
