//! Error type for the configuration and palette boundaries
//!
//! The color pipeline itself has no failure modes: degenerate inputs such as
//! achromatic colors, empty buckets, or images without foreground pixels are
//! ordinary data states with defined results.

use thiserror::Error;

/// Result type alias for colorsig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a palette or a configuration
#[derive(Error, Debug)]
pub enum Error {
	/// Two palette entries share a name
	#[error("duplicate palette entry name: {name}")]
	DuplicatePaletteName {
		/// The repeated name
		name: String,
	},

	/// A palette entry has an empty name
	#[error("palette entry at index {index} has an empty name")]
	EmptyPaletteName {
		/// Position of the entry in the input
		index: usize,
	},

	/// A configuration value is out of range
	#[error("invalid configuration parameter: {parameter} = {value}")]
	InvalidConfig {
		/// Name of the parameter
		parameter: String,
		/// The rejected value
		value: String,
	},

	/// A configuration could not be parsed
	#[error("failed to parse configuration: {0}")]
	ConfigParse(#[from] serde_json::Error),

	/// A caller supplied palette source failed to produce a palette
	#[error("palette source failed: {message}")]
	PaletteSource {
		/// Context for the failure
		message: String,
		/// Underlying cause, if any
		#[source]
		source: Option<Box<dyn std::error::Error + Send + Sync>>,
	},
}

impl Error {
	/// Create a [`Error::PaletteSource`] wrapping the underlying cause
	pub fn palette_source<E>(message: impl Into<String>, source: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::PaletteSource {
			message: message.into(),
			source: Some(Box::new(source)),
		}
	}
}
