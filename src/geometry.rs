//! Planar geometry kernel for cluster hull construction.
//!
//! Two pure operations: convex hull construction via Andrew's monotone chain,
//! and Catmull-Rom smoothing of a closed hull into a cubic-Bezier SVG path.
//! Both are deterministic: the same input points (including order) always
//! produce the same output, so re-renders and snapshot tests are stable.

use serde::Serialize;

/// A point in layout space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// An axis-aligned bounding box in layout space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Center of the box.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// The box grown outward by `padding` on every side.
	pub fn expanded(&self, padding: f64) -> Rect {
		Rect::new(
			self.x - padding,
			self.y - padding,
			self.width + padding * 2.0,
			self.height + padding * 2.0,
		)
	}

	/// The four corners in clockwise order starting at the top-left.
	pub fn corners(&self) -> [Point; 4] {
		[
			Point::new(self.x, self.y),
			Point::new(self.x + self.width, self.y),
			Point::new(self.x + self.width, self.y + self.height),
			Point::new(self.x, self.y + self.height),
		]
	}
}

/// Cross product of `oa` and `ob`. Positive when `o -> a -> b` turns left.
fn cross(o: Point, a: Point, b: Point) -> f64 {
	(a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of a point set via Andrew's monotone chain.
///
/// Points are sorted lexicographically by `(x, y)`, then lower and upper
/// chains are built, discarding a point whenever the last three make a
/// non-left turn (cross product <= 0). Fewer than 3 distinct points is a
/// degenerate hull: the input is returned unchanged and callers skip hull
/// rendering for it.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
	let mut sorted: Vec<Point> = points.to_vec();
	sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
	sorted.dedup_by(|a, b| a.x == b.x && a.y == b.y);

	if sorted.len() < 3 {
		return points.to_vec();
	}

	let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
	for &p in &sorted {
		while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
			lower.pop();
		}
		lower.push(p);
	}

	let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
	for &p in sorted.iter().rev() {
		while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
			upper.pop();
		}
		upper.push(p);
	}

	// The last point of each chain duplicates the first of the other.
	lower.pop();
	upper.pop();
	lower.extend(upper);
	lower
}

/// Format a coordinate for path output. Two decimals keeps paths compact and
/// byte-stable across identical invocations.
fn fmt(v: f64) -> String {
	format!("{:.2}", v)
}

/// Smooth a closed hull into an SVG path string.
///
/// Hulls with fewer than 3 points degrade to a straight-line closed path.
/// Otherwise the hull is treated as a closed Catmull-Rom spline: each
/// consecutive quadruple `(p0, p1, p2, p3)` (indices modulo hull length)
/// yields a cubic Bezier from `p1` to `p2` with control points
/// `cp1 = p1 + (p2 - p0) / 6` and `cp2 = p2 - (p3 - p1) / 6`.
pub fn smooth_hull(hull: &[Point]) -> String {
	if hull.is_empty() {
		return String::new();
	}

	if hull.len() < 3 {
		let mut path = format!("M {},{}", fmt(hull[0].x), fmt(hull[0].y));
		for p in &hull[1..] {
			path.push_str(&format!(" L {},{}", fmt(p.x), fmt(p.y)));
		}
		path.push_str(" Z");
		return path;
	}

	let n = hull.len();
	let mut path = format!("M {},{}", fmt(hull[0].x), fmt(hull[0].y));
	for i in 0..n {
		let p0 = hull[(i + n - 1) % n];
		let p1 = hull[i];
		let p2 = hull[(i + 1) % n];
		let p3 = hull[(i + 2) % n];

		let cp1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
		let cp2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);

		path.push_str(&format!(
			" C {},{} {},{} {},{}",
			fmt(cp1.x),
			fmt(cp1.y),
			fmt(cp2.x),
			fmt(cp2.y),
			fmt(p2.x),
			fmt(p2.y)
		));
	}
	path.push_str(" Z");
	path
}
