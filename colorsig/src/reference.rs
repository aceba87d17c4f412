//! Reference palettes to score images against
//!
//! A palette is obtained through a [`PaletteSource`], so a compiled-in default and a palette
//! fetched from somewhere else at runtime can be used interchangeably.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, RgbColor};

/// A named reference color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteEntry {
	/// Unique name of the entry
	pub name: String,
	/// Reference color
	pub color: RgbColor,
}

impl PaletteEntry {
	/// Create a palette entry
	#[must_use]
	pub fn new(name: impl Into<String>, color: RgbColor) -> Self {
		Self { name: name.into(), color }
	}
}

/// A set of reference colors with unique, non-empty names
///
/// Entry order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct Palette {
	/// Validated entries
	entries: Vec<PaletteEntry>,
}

impl Palette {
	/// Validate and create a palette
	///
	/// # Errors
	/// Returns [`Error::EmptyPaletteName`] or [`Error::DuplicatePaletteName`] if the names are not unique and non-empty.
	pub fn new(entries: impl IntoIterator<Item = PaletteEntry>) -> Result<Self> {
		let entries = entries.into_iter().collect::<Vec<_>>();

		let mut names = HashSet::with_capacity(entries.len());
		for (index, entry) in entries.iter().enumerate() {
			if entry.name.is_empty() {
				return Err(Error::EmptyPaletteName { index });
			}
			if !names.insert(entry.name.as_str()) {
				return Err(Error::DuplicatePaletteName { name: entry.name.clone() });
			}
		}

		Ok(Self { entries })
	}

	/// The entries of the palette
	#[must_use]
	pub fn entries(&self) -> &[PaletteEntry] {
		&self.entries
	}

	/// Look up an entry's color by name
	#[must_use]
	pub fn get(&self, name: &str) -> Option<RgbColor> {
		self.entries.iter().find(|entry| entry.name == name).map(|entry| entry.color)
	}

	/// Number of entries
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the palette has no entries
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl TryFrom<Vec<PaletteEntry>> for Palette {
	type Error = Error;

	fn try_from(entries: Vec<PaletteEntry>) -> Result<Self> {
		Self::new(entries)
	}
}

impl From<Palette> for Vec<PaletteEntry> {
	fn from(palette: Palette) -> Self {
		palette.entries
	}
}

/// Anything that can supply the current reference palette
pub trait PaletteSource {
	/// Produce the palette
	///
	/// # Errors
	/// Sources backed by I/O report failures as [`Error::PaletteSource`].
	fn palette(&self) -> Result<Palette>;
}

impl PaletteSource for Palette {
	fn palette(&self) -> Result<Palette> {
		Ok(self.clone())
	}
}

impl<F> PaletteSource for F
where
	F: Fn() -> Result<Palette>,
{
	fn palette(&self) -> Result<Palette> {
		self()
	}
}

/// The built-in palette of six color tiles
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPalette;

impl BuiltinPalette {
	/// Names and colors of the tiles
	pub const TILES: [(&'static str, RgbColor); 6] = [
		("RED", RgbColor::new(219, 40, 20)),
		("GREEN", RgbColor::new(65, 219, 20)),
		("BLUE", RgbColor::new(10, 20, 150)),
		("YELLOW", RgbColor::new(225, 230, 10)),
		("WHITE", RgbColor::new(255, 255, 255)),
		("BLACK", RgbColor::new(0, 0, 0)),
	];

	/// The tiles as a [`Palette`]
	#[must_use]
	pub fn to_palette(self) -> Palette {
		Palette {
			entries: Self::TILES
				.into_iter()
				.map(|(name, color)| PaletteEntry::new(name, color))
				.collect(),
		}
	}
}

impl PaletteSource for BuiltinPalette {
	fn palette(&self) -> Result<Palette> {
		Ok(self.to_palette())
	}
}
