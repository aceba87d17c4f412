//! Extract the dominant-color signature of a product photograph and score it against a reference palette.
//!
//! # Examples
//!
//! ## Analyse an image against the built-in palette
//!
//! ```
//! use colorsig::{AnalysisConfig, BuiltinPalette, PaletteSource};
//! use image::{Rgb, RgbImage};
//!
//! // a red square on a white background
//! let image = RgbImage::from_fn(10, 10, |x, y| {
//! 	if (2..8).contains(&x) && (2..8).contains(&y) {
//! 		Rgb([219, 40, 20])
//! 	} else {
//! 		Rgb([255, 255, 255])
//! 	}
//! });
//!
//! let palette = BuiltinPalette.palette()?;
//! let signature = colorsig::analyze(&image, &palette, &AnalysisConfig::default())
//! 	.signature()
//! 	.expect("the white border is uniform");
//!
//! assert_eq!(signature.scores.best_match().map(|(name, _)| name), Some("RED"));
//! # Ok::<(), colorsig::Error>(())
//! ```
//!
//! ## Run the stages individually
//!
//! ```
//! use colorsig::{ColorDistribution, Raster};
//! # use image::{Rgb, RgbImage};
//! # let image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
//! # let palette = colorsig::BuiltinPalette.to_palette();
//!
//! let border = colorsig::detect_border(&image, 7.0);
//! if border.is_acceptable(0.9) {
//! 	let buckets = colorsig::quantize(&Raster::pixels(&image), border.color, 7.0);
//! 	let clusters = colorsig::merge(buckets);
//! 	let distribution = ColorDistribution::new(clusters);
//! 	let scores = colorsig::score(&distribution, &palette);
//! }
//! ```
//!
//! # Pipeline
//!
//! ## Border detection
//!
//! The four edges of the image are compared against its top-left pixel.
//! If every edge is uniform enough (by default at least 90% of its pixels are within a
//! color difference of `7.0`), the mean edge color is taken as the background color.
//! Otherwise the image is rejected, since its product cannot be told apart from the background.
//!
//! ## Quantization
//!
//! Foreground pixels (those further than the exclusion threshold from the background color)
//! are grouped by median cut into up to 32 buckets, which are then greedily merged down to 5 clusters.
//!
//! ## Scoring
//!
//! Each palette entry is scored with the share-weighted mean color difference to the clusters.
//! Lower is better. An image without foreground pixels scores [`NO_COLOR_DATA_SCORE`] everywhere.
//!
//! # Color difference
//!
//! Colors are compared in CIE L*a*b* with a CIEDE2000-style formula, see [`distance`].
//! Both the XYZ and Lab conversion steps round to two decimal places, which makes the
//! distances reproducible but also means they differ slightly from unrounded CIEDE2000.
//!
//! # Features
//!
//! `threads` (enabled by default) adds [`analyze_batch_par`] which analyses images in parallel using rayon.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unreadable_literal)]

mod border;
mod color;
pub mod config;
mod conversion;
mod distance;
mod distribution;
mod error;
mod merge;
mod pipeline;
mod quantize;
mod raster;
mod reference;
mod score;

pub use border::{detect_border, detect_border_default, BorderResult, Edge};
pub use color::{mean_color, Channel, LabColor, RgbColor, XyzColor};
pub use config::AnalysisConfig;
pub use conversion::{to_lab, to_xyz, xyz_to_lab};
pub use distance::{distance, distance_rgb};
pub use distribution::{ColorDistribution, ColorDistributionEntry};
pub use error::{Error, Result};
pub use merge::{merge, merge_with};
#[cfg(feature = "threads")]
pub use pipeline::analyze_batch_par;
pub use pipeline::{analyze, analyze_batch, color_distribution, first_acceptable, rank_by_entry, Analysis, ImageSignature};
pub use quantize::{quantize, quantize_with};
pub use raster::Raster;
pub use reference::{BuiltinPalette, Palette, PaletteEntry, PaletteSource};
pub use score::{score, ScoreMap, NO_COLOR_DATA_SCORE};
