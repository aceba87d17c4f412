//! Per-image analysis: border detection, quantization, merging, and scoring
//!
//! Every function here is a pure function of its inputs.
//! Images can be analysed concurrently without any coordination.

use serde::{Deserialize, Serialize};

use crate::{
	detect_border, merge_with, quantize_with, score, AnalysisConfig, BorderResult, ColorDistribution, Palette, Raster,
	RgbColor, ScoreMap,
};

/// The color signature of an image whose border was usable as background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSignature {
	/// Detected background color
	pub border_color: RgbColor,
	/// Dominant foreground colors
	pub distribution: ColorDistribution,
	/// Score of the distribution against each palette entry
	pub scores: ScoreMap,
}

/// Outcome of analysing a single image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Analysis {
	/// At least one edge was not uniform enough, so the background could not be separated
	Rejected(BorderResult),
	/// The image was analysed
	Accepted(ImageSignature),
}

impl Analysis {
	/// The signature, if the image was accepted
	#[must_use]
	pub fn signature(self) -> Option<ImageSignature> {
		match self {
			Self::Accepted(signature) => Some(signature),
			Self::Rejected(_) => None,
		}
	}

	/// Whether the image was accepted
	#[must_use]
	pub const fn is_accepted(&self) -> bool {
		matches!(self, Self::Accepted(_))
	}
}

/// Compute the dominant-color distribution of an image given its background color
#[must_use]
pub fn color_distribution(raster: &impl Raster, background: RgbColor, config: &AnalysisConfig) -> ColorDistribution {
	let buckets = quantize_with(
		&raster.pixels(),
		background,
		config.exclusion_threshold,
		config.bucket_target,
		config.quantizer_max_iterations,
	);

	// empty buckets carry no pixels and would only drag merged colors towards black
	let buckets = buckets.into_iter().filter(|&(_, share)| share > 0).collect::<Vec<_>>();
	let bucket_count = buckets.len();

	let clusters = merge_with(buckets, config.cluster_target, config.merge_max_iterations);
	tracing::debug!(buckets = bucket_count, clusters = clusters.len(), "quantized image");

	ColorDistribution::new(clusters)
}

/// Analyse a single image against a palette
///
/// `config` is expected to be valid, see [`AnalysisConfig::validate`].
#[must_use]
pub fn analyze(raster: &impl Raster, palette: &Palette, config: &AnalysisConfig) -> Analysis {
	let border = detect_border(raster, config.border_distance_threshold);
	if !border.is_acceptable(config.uniformity_threshold) {
		tracing::debug!(
			top = border.top,
			bottom = border.bottom,
			left = border.left,
			right = border.right,
			"border is not uniform enough"
		);
		return Analysis::Rejected(border);
	}

	let distribution = color_distribution(raster, border.color, config);
	let scores = score(&distribution, palette);

	Analysis::Accepted(ImageSignature { border_color: border.color, distribution, scores })
}

/// Analyse candidate images in order and return the first one that is accepted, along with its index
///
/// Candidates after the first accepted one are not analysed.
pub fn first_acceptable<R: Raster>(
	candidates: impl IntoIterator<Item = R>,
	palette: &Palette,
	config: &AnalysisConfig,
) -> Option<(usize, ImageSignature)> {
	let found = candidates
		.into_iter()
		.enumerate()
		.find_map(|(i, raster)| analyze(&raster, palette, config).signature().map(|signature| (i, signature)));

	if found.is_none() {
		tracing::warn!("no candidate image has an acceptable border");
	}

	found
}

/// Analyse many images, returning the analyses in input order
#[must_use]
pub fn analyze_batch<R: Raster>(rasters: &[R], palette: &Palette, config: &AnalysisConfig) -> Vec<Analysis> {
	rasters.iter().map(|raster| analyze(raster, palette, config)).collect()
}

/// Analyse many images in parallel, returning the analyses in input order
#[cfg(feature = "threads")]
#[must_use]
pub fn analyze_batch_par<R: Raster + Sync>(rasters: &[R], palette: &Palette, config: &AnalysisConfig) -> Vec<Analysis> {
	use rayon::prelude::*;

	rasters.par_iter().map(|raster| analyze(raster, palette, config)).collect()
}

/// Order signatures from best to worst match for the named palette entry
///
/// Signatures without a score for `name` come last. The sort is stable.
#[must_use]
pub fn rank_by_entry<'a>(signatures: &'a [ImageSignature], name: &str) -> Vec<&'a ImageSignature> {
	let mut ranked = signatures.iter().collect::<Vec<_>>();
	ranked.sort_by(|x, y| {
		let x = x.scores.get(name).unwrap_or(f64::INFINITY);
		let y = y.scores.get(name).unwrap_or(f64::INFINITY);
		f64::total_cmp(&x, &y)
	});
	ranked
}
