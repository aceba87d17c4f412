//! sRGB to CIE XYZ to CIE L*a*b* conversion
//!
//! Both conversion steps round their output to two decimal places.
//! Every distance computed by this crate goes through these rounded values,
//! so the rounding is part of the observable behavior and must not be removed.

use crate::{
	color::round_half_up,
	config::{D65_WHITE, LAB_EPSILON, LAB_KAPPA, SRGB_GAMMA, SRGB_LINEAR_BREAKPOINT},
	LabColor, RgbColor, XyzColor,
};

/// Linear sRGB to XYZ (D65) matrix
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
	[0.4124564, 0.3575761, 0.1804375],
	[0.2126729, 0.7151522, 0.0721750],
	[0.0193339, 0.1191920, 0.9503041],
];

/// Round to two decimal places
fn round2(x: f64) -> f64 {
	round_half_up(x * 100.0) / 100.0
}

/// Inverse sRGB companding of a channel in `0.0..=1.0`
fn inverse_compand(companded: f64) -> f64 {
	if companded <= SRGB_LINEAR_BREAKPOINT {
		companded / 12.92
	} else {
		((companded + 0.055) / 1.055).powf(SRGB_GAMMA)
	}
}

/// The Lab companding function
fn lab_f(t: f64) -> f64 {
	if t > LAB_EPSILON {
		t.cbrt()
	} else {
		(LAB_KAPPA * t + 16.0) / 116.0
	}
}

/// Convert an sRGB color to XYZ on the `0.0..=100.0` scale, rounded to two decimals
#[must_use]
pub fn to_xyz(color: RgbColor) -> XyzColor {
	let linear = color.channels().map(|c| inverse_compand(f64::from(c) / 255.0));

	let [x, y, z] = SRGB_TO_XYZ.map(|row| {
		let sum = row.iter().zip(&linear).map(|(m, c)| m * c).sum::<f64>();
		round2(sum * 100.0)
	});

	XyzColor::new(x, y, z)
}

/// Convert an XYZ color to Lab, rounded to two decimals
#[must_use]
pub fn xyz_to_lab(xyz: XyzColor) -> LabColor {
	let [xn, yn, zn] = D65_WHITE;
	let fx = lab_f(xyz.x / xn);
	let fy = lab_f(xyz.y / yn);
	let fz = lab_f(xyz.z / zn);

	LabColor::new(
		round2(116.0 * fy - 16.0),
		round2(500.0 * (fx - fy)),
		round2(200.0 * (fy - fz)),
	)
}

/// Convert an sRGB color to Lab
#[must_use]
pub fn to_lab(color: RgbColor) -> LabColor {
	xyz_to_lab(to_xyz(color))
}
