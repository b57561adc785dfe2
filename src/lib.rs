//! inquiry-graph: deterministic layout and clustering engine for
//! claim/evidence knowledge graphs.
//!
//! A pure computation library sitting between a data-fetching layer and a
//! rendering layer. Given a graph snapshot (typed nodes, directed edges, and
//! optional backend-computed cluster assignments), it produces:
//!
//! - positioned nodes, in clustered or layered mode, with dense clusters
//!   collapsed into synthetic super-nodes (`layout`),
//! - smoothed convex-hull overlay paths around expanded clusters (`hull`),
//! - zoom-dependent visibility and detail tiers per node (`disclosure`),
//! - one-hop neighborhood detail for a selected node (`detail`).
//!
//! The engine is synchronous and holds no state between calls except the
//! caller-owned [`CollapseState`]. Identical inputs always produce identical
//! output; all transform/viewport concerns belong to the rendering layer.

use log::info;
use thiserror::Error;

pub mod collapse;
pub mod detail;
pub mod disclosure;
pub mod geometry;
pub mod hull;
pub mod layout;
pub mod theme;
pub mod types;

pub use collapse::{ClusterHandle, ClusterKey, CollapseState};
pub use detail::{NodeDetail, resolve as resolve_detail};
pub use disclosure::{DetailTier, Disclosure, DisclosureConfig};
pub use geometry::{Point, Rect, convex_hull, smooth_hull};
pub use hull::{ClusterHull, HullConfig, build_hulls};
pub use layout::{LayoutConfig, LayoutMode, LayoutResult, PositionedKind, PositionedNode, layout};
pub use theme::Theme;
pub use types::{
	BackendCluster, ClusterInfo, GraphEdge, GraphNode, GraphSnapshot, NodeStatus, NodeType, Scope,
	TypeFilter,
};

/// Snapshot ingestion failure. The engine's only fallible surface; everything
/// downstream of a parsed snapshot degrades silently instead of erroring.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// The snapshot JSON did not match the expected shape.
	#[error("failed to parse graph snapshot: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a graph snapshot from JSON.
///
/// Expected shape: `{ "nodes": [...], "edges": [...], "clusters": [...]? }`.
pub fn parse_snapshot(json: &str) -> Result<GraphSnapshot, SnapshotError> {
	let snapshot: GraphSnapshot = serde_json::from_str(json)?;
	info!(
		"inquiry-graph: loaded {} nodes, {} edges, {} clusters",
		snapshot.nodes.len(),
		snapshot.edges.len(),
		snapshot.clusters.as_ref().map(Vec::len).unwrap_or(0)
	);
	Ok(snapshot)
}
