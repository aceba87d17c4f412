//! CIEDE2000-style perceptual color difference
//!
//! This follows the CIEDE2000 formula with two deviations that are kept for output compatibility:
//! - when either corrected chroma is zero, the mean hue is the plain *sum* of both hues
//! - the rotation term uses the `G` factor computed from the uncorrected mean chroma
//!
//! Because the rotation term depends on the mean hue, the result is not guaranteed to be symmetric.

use crate::{config::CHROMA_CORRECTION, to_lab, LabColor, RgbColor};

/// Hue angle in degrees in `0.0..360.0`, or `0.0` for achromatic colors
fn hue_angle(a: f64, b: f64) -> f64 {
	#[allow(clippy::float_cmp)]
	if a == 0.0 && b == 0.0 {
		return 0.0;
	}

	let angle = b.atan2(a).to_degrees();
	if angle < 0.0 {
		angle + 360.0
	} else {
		angle
	}
}

/// Mean hue of two colors, given their hues and corrected chromas
fn mean_hue(h1: f64, h2: f64, c1: f64, c2: f64) -> f64 {
	let sum = h1 + h2;
	#[allow(clippy::float_cmp)]
	if c1 * c2 == 0.0 {
		sum
	} else if (h1 - h2).abs() <= 180.0 {
		sum / 2.0
	} else if sum < 360.0 {
		(sum + 360.0) / 2.0
	} else {
		(sum - 360.0) / 2.0
	}
}

/// Signed hue difference `h2 - h1` wrapped into `(-180.0, 180.0]`
fn delta_hue(h1: f64, h2: f64, c1: f64, c2: f64) -> f64 {
	#[allow(clippy::float_cmp)]
	if c1 * c2 == 0.0 {
		return 0.0;
	}

	let delta = h2 - h1;
	if delta.abs() <= 180.0 {
		delta
	} else if delta > 180.0 {
		delta - 360.0
	} else {
		delta + 360.0
	}
}

/// Cosine of an angle given in degrees
fn cos_deg(degrees: f64) -> f64 {
	degrees.to_radians().cos()
}

/// Color difference between two Lab colors
///
/// The result is `>= 0.0` and is `0.0` for identical colors.
#[must_use]
pub fn distance(x: LabColor, y: LabColor) -> f64 {
	let chroma1 = (x.a * x.a + x.b * x.b).sqrt();
	let chroma2 = (y.a * y.a + y.b * y.b).sqrt();

	let mean_chroma7 = ((chroma1 + chroma2) / 2.0).powi(7);
	let g = (mean_chroma7 / (mean_chroma7 + CHROMA_CORRECTION)).sqrt();
	let a_scale = 1.0 + (1.0 - g) / 2.0;

	let a1 = a_scale * x.a;
	let a2 = a_scale * y.a;
	let c1 = (a1 * a1 + x.b * x.b).sqrt();
	let c2 = (a2 * a2 + y.b * y.b).sqrt();
	let h1 = hue_angle(a1, x.b);
	let h2 = hue_angle(a2, y.b);

	let mean_l = (x.l + y.l) / 2.0;
	let l50 = (mean_l - 50.0).powi(2);
	let s_l = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();

	let mean_c = (c1 + c2) / 2.0;
	let s_c = 1.0 + 0.045 * mean_c;

	let mean_h = mean_hue(h1, h2, c1, c2);
	let t = 1.0 - 0.17 * cos_deg(mean_h - 30.0) + 0.24 * cos_deg(2.0 * mean_h) + 0.32 * cos_deg(3.0 * mean_h + 6.0)
		- 0.2 * cos_deg(4.0 * mean_h - 63.0);
	let s_h = 1.0 + 0.015 * mean_c * t;

	let dh = delta_hue(h1, h2, c1, c2);
	let delta_h = 2.0 * (c1 * c2).sqrt() * (dh / 2.0).to_radians().sin();

	let rotation = -2.0 * g * (60.0 * (-((mean_h - 275.0) / 25.0).powi(2)).exp()).to_radians().sin();

	let l_term = (y.l - x.l) / s_l;
	let c_term = (c2 - c1) / s_c;
	let h_term = delta_h / s_h;

	// |rotation| < 2, so the radicand is non-negative up to rounding error
	(l_term * l_term + c_term * c_term + h_term * h_term + rotation * c_term * h_term)
		.max(0.0)
		.sqrt()
}

/// Color difference between two sRGB colors, converting both to Lab first
#[must_use]
pub fn distance_rgb(x: RgbColor, y: RgbColor) -> f64 {
	distance(to_lab(x), to_lab(y))
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rand::{Rng, SeedableRng};
	use rand_xoshiro::Xoshiro256PlusPlus;

	const RED: RgbColor = RgbColor::new(219, 40, 20);
	const BLUE: RgbColor = RgbColor::new(10, 20, 150);

	fn random_colors(n: usize) -> Vec<RgbColor> {
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
		(0..n).map(|_| RgbColor::new(rng.gen(), rng.gen(), rng.gen())).collect()
	}

	#[test]
	fn reflexive() {
		for color in random_colors(500) {
			assert_abs_diff_eq!(distance_rgb(color, color), 0.0);
		}
		assert_abs_diff_eq!(distance_rgb(RgbColor::BLACK, RgbColor::BLACK), 0.0);
		assert_abs_diff_eq!(distance_rgb(RgbColor::WHITE, RgbColor::WHITE), 0.0);
	}

	#[test]
	fn non_negative_and_finite() {
		let colors = random_colors(200);
		for &x in &colors {
			for &y in &colors {
				let d = distance_rgb(x, y);
				assert!(d.is_finite());
				assert!(d >= 0.0);
			}
		}
	}

	#[test]
	fn known_distances() {
		assert_abs_diff_eq!(distance_rgb(RED, RgbColor::WHITE), 48.462_368_029_864_09, epsilon = 1e-6);
		assert_abs_diff_eq!(distance_rgb(RED, RgbColor::BLACK), 45.245_869_948_701_28, epsilon = 1e-6);
		assert_abs_diff_eq!(distance_rgb(RED, BLUE), 50.282_606_170_286_925, epsilon = 1e-6);
		assert_abs_diff_eq!(distance_rgb(RgbColor::WHITE, RgbColor::BLACK), 100.0, epsilon = 1e-4);
	}

	#[test]
	fn near_white_thresholds() {
		let white = RgbColor::WHITE;
		assert!(distance_rgb(white, RgbColor::new(250, 250, 250)) < 7.0);
		assert!(distance_rgb(white, RgbColor::new(240, 240, 240)) < 7.0);
		assert!(distance_rgb(white, RgbColor::new(230, 230, 230)) < 7.0);
		assert!(distance_rgb(white, RgbColor::new(200, 200, 200)) > 7.0);
	}

	#[test]
	fn achromatic_hue_is_zero() {
		assert_abs_diff_eq!(hue_angle(0.0, 0.0), 0.0);
		assert_abs_diff_eq!(hue_angle(0.0, -1.0), 270.0, epsilon = 1e-9);
		assert_abs_diff_eq!(hue_angle(-1.0, 0.0), 180.0, epsilon = 1e-9);
	}

	#[test]
	fn mean_hue_branches() {
		// zero chroma gives the unnormalized sum
		assert_abs_diff_eq!(mean_hue(100.0, 120.0, 0.0, 5.0), 220.0);
		assert_abs_diff_eq!(mean_hue(100.0, 120.0, 5.0, 5.0), 110.0);
		assert_abs_diff_eq!(mean_hue(10.0, 300.0, 5.0, 5.0), 335.0);
		assert_abs_diff_eq!(mean_hue(200.0, 350.0, 5.0, 5.0), 275.0);
		assert_abs_diff_eq!(mean_hue(100.0, 300.0, 5.0, 5.0), 20.0);
	}

	#[test]
	fn delta_hue_wraps() {
		assert_abs_diff_eq!(delta_hue(10.0, 350.0, 1.0, 1.0), -20.0);
		assert_abs_diff_eq!(delta_hue(350.0, 10.0, 1.0, 1.0), 20.0);
		assert_abs_diff_eq!(delta_hue(0.0, 180.0, 1.0, 1.0), 180.0);
		assert_abs_diff_eq!(delta_hue(10.0, 350.0, 0.0, 1.0), 0.0);
	}

	#[test]
	fn lab_overload_matches_rgb() {
		assert_abs_diff_eq!(distance(to_lab(RED), to_lab(BLUE)), distance_rgb(RED, BLUE));
	}
}
