use approx::assert_abs_diff_eq;
use colorsig::{Analysis, AnalysisConfig, BuiltinPalette, Edge, PaletteSource, RgbColor};
use image::{Rgb, RgbImage};

const RED: RgbColor = RgbColor::new(219, 40, 20);

/// 4x4 image with a one pixel white border around a 2x2 red square
fn red_square() -> RgbImage {
	RgbImage::from_fn(4, 4, |x, y| {
		if (1..3).contains(&x) && (1..3).contains(&y) {
			Rgb(RED.channels())
		} else {
			Rgb([255, 255, 255])
		}
	})
}

#[test]
fn red_square_on_white() {
	let image = red_square();
	let palette = BuiltinPalette.palette().expect("builtin palette");

	let border = colorsig::detect_border_default(&image);
	assert_eq!(border.color, RgbColor::WHITE);
	for edge in Edge::ALL {
		assert_abs_diff_eq!(border.uniformity(edge), 1.0);
	}

	let Analysis::Accepted(signature) = colorsig::analyze(&image, &palette, &AnalysisConfig::default()) else {
		panic!("white border should be accepted");
	};

	assert_eq!(signature.border_color, RgbColor::WHITE);
	assert_eq!(signature.distribution.len(), 1);
	let dominant = signature.distribution.dominant().expect("red square");
	assert_eq!(dominant.color, RED);
	assert_eq!(dominant.share, 4);

	assert_abs_diff_eq!(signature.scores.get("RED").expect("scored"), 0.0);
	for name in ["WHITE", "BLACK", "BLUE"] {
		assert!(signature.scores.get(name).expect("scored") > 40.0);
	}
	assert_eq!(signature.scores.best_match().map(|(name, _)| name), Some("RED"));
}

#[test]
fn config_from_json_changes_outcome() {
	// a top edge that is only half white
	let image = RgbImage::from_fn(4, 4, |x, y| {
		if y == 0 && x >= 2 {
			Rgb([0, 0, 0])
		} else if (1..3).contains(&x) && (1..3).contains(&y) {
			Rgb(RED.channels())
		} else {
			Rgb([255, 255, 255])
		}
	});
	let palette = BuiltinPalette.to_palette();

	assert!(!colorsig::analyze(&image, &palette, &AnalysisConfig::default()).is_accepted());

	let config = AnalysisConfig::from_json(r#"{ "uniformity_threshold": 0.5 }"#).expect("valid config");
	assert!(colorsig::analyze(&image, &palette, &config).is_accepted());
}

#[test]
fn signature_serializes() {
	let signature = colorsig::analyze(&red_square(), &BuiltinPalette.to_palette(), &AnalysisConfig::default())
		.signature()
		.expect("accepted");

	let json = serde_json::to_value(&signature).expect("serializable");
	assert_eq!(json["border_color"], serde_json::json!({ "r": 255, "g": 255, "b": 255 }));
	assert_eq!(json["distribution"][0]["share"], 4);
	assert_eq!(json["scores"]["RED"], 0.0);
}
