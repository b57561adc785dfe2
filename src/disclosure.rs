//! Zoom-dependent progressive disclosure.
//!
//! This module centralizes every zoom threshold in one configuration struct,
//! making it easy to understand and tune what is shown at which zoom level.
//!
//! Two independent decisions are made per node, per frame:
//!
//! - **Visibility**: each node declares an importance tier (1 = low,
//!   2 = medium, 3 = high); a static table maps the tier to the minimum zoom
//!   at which the node appears. High-importance nodes are always visible.
//! - **Detail tier**: the current zoom alone selects how much of a node to
//!   render: [`DetailTier::Compact`] below the summary threshold,
//!   [`DetailTier::Summary`] between the thresholds, [`DetailTier::Detail`]
//!   above the detail threshold.

use serde::Serialize;

/// How much of a node's content to render at the current zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailTier {
	/// Shape and color only.
	Compact,
	/// Truncated content and status badge.
	Summary,
	/// Full content, confidence, and provenance.
	Detail,
}

/// Zoom thresholds for visibility and detail selection.
///
/// All values are configurable tuning constants; call sites never carry their
/// own thresholds.
#[derive(Clone, Copy, Debug)]
pub struct DisclosureConfig {
	/// Minimum zoom at which each importance tier becomes visible, indexed
	/// by `importance - 1`. Tier 3 defaults to 0.0 (always visible).
	pub min_zoom: [f64; 3],
	/// Zoom at which rendering switches from compact to summary.
	pub summary_zoom: f64,
	/// Zoom at which rendering switches from summary to full detail.
	pub detail_zoom: f64,
}

impl Default for DisclosureConfig {
	fn default() -> Self {
		Self {
			min_zoom: [1.0, 0.5, 0.0],
			summary_zoom: 0.75,
			detail_zoom: 1.5,
		}
	}
}

/// Resolved disclosure for one node at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disclosure {
	pub visible: bool,
	pub tier: DetailTier,
}

impl DisclosureConfig {
	/// Resolve visibility and detail tier for a node.
	///
	/// Pure: no side effects, safe to call per node per frame. Importance
	/// values outside 1..=3 are clamped into range.
	pub fn resolve(&self, importance: u8, zoom: f64) -> Disclosure {
		let tier_index = (importance.clamp(1, 3) - 1) as usize;
		let visible = zoom >= self.min_zoom[tier_index];

		let tier = if zoom < self.summary_zoom {
			DetailTier::Compact
		} else if zoom < self.detail_zoom {
			DetailTier::Summary
		} else {
			DetailTier::Detail
		};

		Disclosure { visible, tier }
	}
}
