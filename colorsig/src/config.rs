//! Tunable analysis parameters and the fixed numeric constants of the color model

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// sRGB companding breakpoint below which the transfer function is linear
pub const SRGB_LINEAR_BREAKPOINT: f64 = 0.04045;

/// Exponent of the non-linear part of the sRGB transfer function
pub const SRGB_GAMMA: f64 = 2.4;

/// Breakpoint of the linear segment of the Lab companding function
pub const LAB_EPSILON: f64 = 0.008856;

/// Slope of the linear segment of the Lab companding function
pub const LAB_KAPPA: f64 = 903.3;

/// D65 reference white on the `0.0..=100.0` XYZ scale
pub const D65_WHITE: [f64; 3] = [95.047, 100.000, 108.883];

/// `25^7`, the chroma constant of the CIEDE2000 `G` factor
pub const CHROMA_CORRECTION: f64 = 6_103_515_625.0;

/// Maximum color difference from the top-left pixel for an edge pixel to count as uniform
pub const BORDER_DISTANCE_THRESHOLD: f64 = 7.0;

/// Minimum uniformity every edge must reach for a border to be usable
pub const BORDER_UNIFORMITY_THRESHOLD: f64 = 0.9;

/// Median cut stops once it has at least this many buckets
pub const QUANTIZER_BUCKET_TARGET: usize = 32;

/// Maximum number of median cut passes
pub const QUANTIZER_MAX_ITERATIONS: u32 = 100;

/// Cluster merging stops once at most this many clusters remain
pub const MERGE_TARGET_COUNT: usize = 5;

/// Maximum number of cluster merges
pub const MERGE_MAX_ITERATIONS: u32 = 100;

/// Parameters for [`crate::analyze`]
///
/// The [`Default`] implementation carries the standard constants above.
/// Missing fields in a deserialized configuration fall back to these defaults.
///
/// ```
/// let config = colorsig::AnalysisConfig::from_json(r#"{ "cluster_target": 3 }"#)?;
/// assert_eq!(config.cluster_target, 3);
/// assert_eq!(config.bucket_target, 32);
/// # Ok::<(), colorsig::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
	/// See [`BORDER_DISTANCE_THRESHOLD`]
	pub border_distance_threshold: f64,
	/// See [`BORDER_UNIFORMITY_THRESHOLD`]
	pub uniformity_threshold: f64,
	/// Pixels within this color difference of the border color are treated as background
	pub exclusion_threshold: f64,
	/// See [`QUANTIZER_BUCKET_TARGET`]
	pub bucket_target: usize,
	/// See [`QUANTIZER_MAX_ITERATIONS`]
	pub quantizer_max_iterations: u32,
	/// See [`MERGE_TARGET_COUNT`]
	pub cluster_target: usize,
	/// See [`MERGE_MAX_ITERATIONS`]
	pub merge_max_iterations: u32,
}

impl Default for AnalysisConfig {
	fn default() -> Self {
		Self {
			border_distance_threshold: BORDER_DISTANCE_THRESHOLD,
			uniformity_threshold: BORDER_UNIFORMITY_THRESHOLD,
			exclusion_threshold: BORDER_DISTANCE_THRESHOLD,
			bucket_target: QUANTIZER_BUCKET_TARGET,
			quantizer_max_iterations: QUANTIZER_MAX_ITERATIONS,
			cluster_target: MERGE_TARGET_COUNT,
			merge_max_iterations: MERGE_MAX_ITERATIONS,
		}
	}
}

impl AnalysisConfig {
	/// Parse and validate a JSON configuration
	///
	/// # Errors
	/// Returns [`Error::ConfigParse`] for malformed JSON and [`Error::InvalidConfig`] for out of range values.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check that every parameter is in range
	///
	/// # Errors
	/// Returns [`Error::InvalidConfig`] naming the first offending parameter.
	pub fn validate(&self) -> Result<()> {
		/// Build an [`Error::InvalidConfig`]
		fn invalid(parameter: &str, value: impl ToString) -> Error {
			Error::InvalidConfig {
				parameter: parameter.to_owned(),
				value: value.to_string(),
			}
		}

		if !self.border_distance_threshold.is_finite() || self.border_distance_threshold < 0.0 {
			return Err(invalid("border_distance_threshold", self.border_distance_threshold));
		}
		if !(0.0..=1.0).contains(&self.uniformity_threshold) {
			return Err(invalid("uniformity_threshold", self.uniformity_threshold));
		}
		if !self.exclusion_threshold.is_finite() || self.exclusion_threshold < 0.0 {
			return Err(invalid("exclusion_threshold", self.exclusion_threshold));
		}
		if self.bucket_target == 0 {
			return Err(invalid("bucket_target", self.bucket_target));
		}
		if self.cluster_target == 0 {
			return Err(invalid("cluster_target", self.cluster_target));
		}

		Ok(())
	}
}
