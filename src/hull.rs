//! Cluster hull overlays.
//!
//! Turns the layout engine's cluster list plus per-node bounding boxes into
//! smoothed convex-hull paths ready for the renderer. Output is purely
//! presentational (path string, colors, label anchor) and carries no
//! interaction state: overlays must never intercept pointer events.

use std::collections::HashMap;

use log::debug;

use crate::geometry::{Point, Rect, convex_hull, smooth_hull};
use crate::theme::{Color, Theme};
use crate::types::{ClusterInfo, NodeType};

/// Hull construction tuning.
#[derive(Clone, Copy, Debug)]
pub struct HullConfig {
	/// Outward padding applied to every member bounding box before hulling.
	pub padding: f64,
	/// Vertical offset of the label anchor above the hull's bounding box.
	pub label_offset: f64,
}

impl Default for HullConfig {
	fn default() -> Self {
		Self {
			padding: 16.0,
			label_offset: 14.0,
		}
	}
}

/// A renderable cluster hull.
#[derive(Clone, Debug)]
pub struct ClusterHull {
	pub cluster_id: String,
	pub label: String,
	/// Closed SVG path around the cluster's members.
	pub path: String,
	/// Dominant-type base color.
	pub color: Color,
	/// Fill paint (base color at the theme's hull fill alpha).
	pub fill: String,
	/// Stroke paint.
	pub stroke: String,
	/// Label paint.
	pub label_color: String,
	/// Anchor for the cluster label, centered above the hull.
	pub label_pos: Point,
}

/// Dominant node type of a member list: highest count, ties broken by which
/// type was seen first. Falls back to `Claim` when nothing resolves.
fn dominant_type(member_ids: &[String], node_types: &HashMap<String, NodeType>) -> NodeType {
	let mut counts = [0usize; 4];
	let mut first_seen = [usize::MAX; 4];

	for (pos, id) in member_ids.iter().enumerate() {
		if let Some(kind) = node_types.get(id) {
			let i = kind.index();
			counts[i] += 1;
			if first_seen[i] == usize::MAX {
				first_seen[i] = pos;
			}
		}
	}

	let mut best = None;
	for kind in NodeType::ALL {
		let i = kind.index();
		if counts[i] == 0 {
			continue;
		}
		best = match best {
			None => Some(kind),
			Some(current) => {
				let j = current.index();
				if counts[i] > counts[j] || (counts[i] == counts[j] && first_seen[i] < first_seen[j])
				{
					Some(kind)
				} else {
					Some(current)
				}
			}
		};
	}
	best.unwrap_or(NodeType::Claim)
}

/// Build hull overlays for every cluster with enough geometry.
///
/// Clusters with fewer than two positioned members are skipped, as are
/// clusters whose padded corner set degenerates below three hull points;
/// both are silent drops, never errors. A stale cluster whose member ids no
/// longer resolve to positions simply produces no hull.
pub fn build_hulls(
	clusters: &[ClusterInfo],
	boxes: &HashMap<String, Rect>,
	node_types: &HashMap<String, NodeType>,
	theme: &Theme,
	config: &HullConfig,
) -> Vec<ClusterHull> {
	let mut hulls = Vec::with_capacity(clusters.len());

	for cluster in clusters {
		let mut corners: Vec<Point> = Vec::new();
		let mut mapped = 0usize;
		for id in &cluster.node_ids {
			if let Some(rect) = boxes.get(id) {
				mapped += 1;
				corners.extend(rect.expanded(config.padding).corners());
			}
		}

		if mapped < 2 {
			debug!(
				"hull: skipping cluster {} ({} of {} members positioned)",
				cluster.id,
				mapped,
				cluster.node_ids.len()
			);
			continue;
		}

		let hull = convex_hull(&corners);
		if hull.len() < 3 {
			debug!("hull: degenerate hull for cluster {}, dropped", cluster.id);
			continue;
		}

		let (mut min_x, mut max_x, mut min_y) = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY);
		for p in &hull {
			min_x = min_x.min(p.x);
			max_x = max_x.max(p.x);
			min_y = min_y.min(p.y);
		}

		let color = theme.nodes.color(dominant_type(&cluster.node_ids, node_types));
		hulls.push(ClusterHull {
			cluster_id: cluster.id.clone(),
			label: cluster.label.clone(),
			path: smooth_hull(&hull),
			color,
			fill: color.with_alpha(theme.hull.fill_alpha).to_css(),
			stroke: color.with_alpha(theme.hull.stroke_alpha).to_css(),
			label_color: color.lighten(theme.hull.label_lighten).to_css(),
			label_pos: Point::new((min_x + max_x) / 2.0, min_y - config.label_offset),
		});
	}

	hulls
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cluster(id: &str, members: &[&str]) -> ClusterInfo {
		ClusterInfo {
			id: id.into(),
			label: format!("Cluster {}", id),
			node_ids: members.iter().map(|s| s.to_string()).collect(),
		}
	}

	fn boxes(entries: &[(&str, f64, f64)]) -> HashMap<String, Rect> {
		entries
			.iter()
			.map(|&(id, x, y)| (id.to_string(), Rect::new(x, y, 100.0, 40.0)))
			.collect()
	}

	#[test]
	fn builds_a_hull_around_two_members() {
		let clusters = [cluster("c1", &["a", "b"])];
		let boxes = boxes(&[("a", 0.0, 0.0), ("b", 200.0, 100.0)]);
		let types = HashMap::from([
			("a".to_string(), NodeType::Evidence),
			("b".to_string(), NodeType::Evidence),
		]);

		let hulls = build_hulls(
			&clusters,
			&boxes,
			&types,
			&Theme::default(),
			&HullConfig::default(),
		);
		assert_eq!(hulls.len(), 1);
		let hull = &hulls[0];
		assert!(hull.path.starts_with("M "));
		assert!(hull.path.ends_with(" Z"));
		assert_eq!(hull.color, Theme::default().nodes.evidence);
		// Label sits above the padded hull.
		assert!(hull.label_pos.y < -16.0);
	}

	#[test]
	fn single_positioned_member_renders_no_hull() {
		let clusters = [cluster("c1", &["a", "missing"])];
		let boxes = boxes(&[("a", 0.0, 0.0)]);
		let hulls = build_hulls(
			&clusters,
			&boxes,
			&HashMap::new(),
			&Theme::default(),
			&HullConfig::default(),
		);
		assert!(hulls.is_empty());
	}

	#[test]
	fn stale_cluster_is_dropped_silently() {
		let clusters = [cluster("c1", &["gone-1", "gone-2"])];
		let hulls = build_hulls(
			&clusters,
			&HashMap::new(),
			&HashMap::new(),
			&Theme::default(),
			&HullConfig::default(),
		);
		assert!(hulls.is_empty());
	}

	#[test]
	fn dominant_type_prefers_highest_count() {
		let types = HashMap::from([
			("a".to_string(), NodeType::Tension),
			("b".to_string(), NodeType::Evidence),
			("c".to_string(), NodeType::Evidence),
		]);
		let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
		assert_eq!(dominant_type(&ids, &types), NodeType::Evidence);
	}

	#[test]
	fn dominant_type_breaks_ties_by_first_seen() {
		let types = HashMap::from([
			("a".to_string(), NodeType::Tension),
			("b".to_string(), NodeType::Evidence),
		]);
		let ids: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
		assert_eq!(dominant_type(&ids, &types), NodeType::Tension);
	}

	#[test]
	fn unknown_members_fall_back_to_claim() {
		assert_eq!(
			dominant_type(&["x".to_string()], &HashMap::new()),
			NodeType::Claim
		);
	}

	#[test]
	fn hull_output_is_deterministic() {
		let clusters = [cluster("c1", &["a", "b", "c"])];
		let boxes = boxes(&[("a", 0.0, 0.0), ("b", 300.0, 40.0), ("c", 120.0, 200.0)]);
		let types = HashMap::from([("a".to_string(), NodeType::Claim)]);

		let theme = Theme::default();
		let config = HullConfig::default();
		let first = build_hulls(&clusters, &boxes, &types, &theme, &config);
		let second = build_hulls(&clusters, &boxes, &types, &theme, &config);
		assert_eq!(first[0].path, second[0].path);
		assert_eq!(first[0].fill, second[0].fill);
	}
}
