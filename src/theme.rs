//! Visual theming: color math plus the per-kind palettes.
//!
//! Node and edge kinds are closed enums, so every palette lookup is an
//! exhaustive `match`: adding a kind without a color is a compile error,
//! not a gray fallback at runtime.

use crate::types::{EdgeType, NodeType};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// One color per node kind.
#[derive(Clone, Copy, Debug)]
pub struct NodePalette {
	pub claim: Color,
	pub evidence: Color,
	pub assumption: Color,
	pub tension: Color,
}

impl NodePalette {
	/// Color for a node kind.
	pub fn color(&self, kind: NodeType) -> Color {
		match kind {
			NodeType::Claim => self.claim,
			NodeType::Evidence => self.evidence,
			NodeType::Assumption => self.assumption,
			NodeType::Tension => self.tension,
		}
	}
}

/// One color per edge kind.
#[derive(Clone, Copy, Debug)]
pub struct EdgePalette {
	pub supports: Color,
	pub contradicts: Color,
	pub depends_on: Color,
}

impl EdgePalette {
	/// Color for an edge kind.
	pub fn color(&self, kind: EdgeType) -> Color {
		match kind {
			EdgeType::Supports => self.supports,
			EdgeType::Contradicts => self.contradicts,
			EdgeType::DependsOn => self.depends_on,
		}
	}
}

/// Hull overlay styling. Overlays are presentational only and must not
/// intercept pointer events, so this carries paint values, no hit config.
#[derive(Clone, Copy, Debug)]
pub struct HullStyle {
	/// Fill opacity of the hull polygon.
	pub fill_alpha: f64,
	/// Stroke opacity of the hull outline.
	pub stroke_alpha: f64,
	/// How much the label color is lightened from the hull color.
	pub label_lighten: f64,
}

/// Complete visual theme.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub nodes: NodePalette,
	pub edges: EdgePalette,
	pub hull: HullStyle,
}

impl Theme {
	/// Dark theme (default).
	pub fn dark() -> Self {
		Self {
			name: "dark",
			nodes: NodePalette {
				claim: Color::rgb(94, 129, 172),      // Steel blue
				evidence: Color::rgb(100, 148, 120),  // Moss green
				assumption: Color::rgb(180, 142, 100), // Tan
				tension: Color::rgb(178, 104, 104),   // Dusty red
			},
			edges: EdgePalette {
				supports: Color::rgba(120, 160, 130, 0.7),
				contradicts: Color::rgba(190, 110, 110, 0.7),
				depends_on: Color::rgba(140, 150, 170, 0.7),
			},
			hull: HullStyle {
				fill_alpha: 0.12,
				stroke_alpha: 0.35,
				label_lighten: 0.25,
			},
		}
	}

	/// Light theme for print-style rendering.
	pub fn light() -> Self {
		Self {
			name: "light",
			nodes: NodePalette {
				claim: Color::rgb(52, 86, 128),
				evidence: Color::rgb(58, 110, 78),
				assumption: Color::rgb(142, 104, 62),
				tension: Color::rgb(146, 64, 64),
			},
			edges: EdgePalette {
				supports: Color::rgba(70, 120, 85, 0.8),
				contradicts: Color::rgba(150, 70, 70, 0.8),
				depends_on: Color::rgba(90, 100, 125, 0.8),
			},
			hull: HullStyle {
				fill_alpha: 0.08,
				stroke_alpha: 0.3,
				label_lighten: 0.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
