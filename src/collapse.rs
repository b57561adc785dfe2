//! Collapse/expand state for dense clusters.
//!
//! The one piece of session state the engine keeps between layout calls.
//! Clusters at or above a member-count threshold collapse into a super-node
//! by default; the user can toggle any cluster, and a manual toggle is never
//! overridden by the default while the cluster survives re-clustering.
//!
//! Clusters are held in an arena with stable integer handles. Identity comes
//! from the backend's centroid node id, falling back to the cluster's
//! position in the assignment list, so two centroid-less clusters never
//! silently merge.

use crate::types::BackendCluster;

/// Default member count at which a cluster auto-collapses.
pub const DEFAULT_AUTO_COLLAPSE_THRESHOLD: usize = 8;

/// Stable handle into the collapse-state arena. Valid until the next
/// [`CollapseState::sync`] that changes the cluster set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClusterHandle(u32);

/// Stable identity of a cluster across re-renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClusterKey {
	/// The backend-designated centroid node id.
	Centroid(String),
	/// Positional fallback for clusters without a centroid.
	Index(usize),
}

impl ClusterKey {
	/// Derive the key for the cluster at `index` in the assignment list.
	pub fn of(cluster: &BackendCluster, index: usize) -> Self {
		match &cluster.centroid_node_id {
			Some(id) => ClusterKey::Centroid(id.clone()),
			None => ClusterKey::Index(index),
		}
	}

	/// String form used for super-node ids and [`crate::types::ClusterInfo`].
	pub fn id_string(&self) -> String {
		match self {
			ClusterKey::Centroid(id) => id.clone(),
			ClusterKey::Index(i) => format!("cluster-{}", i),
		}
	}
}

#[derive(Clone, Debug)]
struct Entry {
	key: ClusterKey,
	collapsed: bool,
	/// True once the user has toggled this cluster in the current session.
	user_set: bool,
}

/// Arena of per-cluster collapse entries.
#[derive(Clone, Debug)]
pub struct CollapseState {
	entries: Vec<Entry>,
	auto_threshold: usize,
}

impl Default for CollapseState {
	fn default() -> Self {
		Self::new()
	}
}

impl CollapseState {
	/// State with the default auto-collapse threshold.
	pub fn new() -> Self {
		Self::with_threshold(DEFAULT_AUTO_COLLAPSE_THRESHOLD)
	}

	/// State with a custom auto-collapse threshold.
	pub fn with_threshold(auto_threshold: usize) -> Self {
		Self {
			entries: Vec::new(),
			auto_threshold,
		}
	}

	/// Reconcile the arena with a (possibly new) cluster assignment.
	///
	/// A no-op when the key sequence is unchanged: defaults are recomputed
	/// only when the set of clusters itself changes identity, never on every
	/// render. On a change, entries are rebuilt from scratch: surviving keys
	/// the user toggled keep their state, everything else gets the
	/// member-count default.
	pub fn sync(&mut self, clusters: &[BackendCluster]) {
		let keys: Vec<ClusterKey> = clusters
			.iter()
			.enumerate()
			.map(|(i, c)| ClusterKey::of(c, i))
			.collect();

		if keys.len() == self.entries.len()
			&& keys.iter().zip(&self.entries).all(|(k, e)| *k == e.key)
		{
			return;
		}

		let old = std::mem::take(&mut self.entries);
		self.entries = keys
			.into_iter()
			.zip(clusters)
			.map(|(key, cluster)| {
				let carried = old.iter().find(|e| e.key == key && e.user_set);
				match carried {
					Some(e) => Entry {
						key,
						collapsed: e.collapsed,
						user_set: true,
					},
					None => Entry {
						collapsed: cluster.node_ids.len() >= self.auto_threshold,
						key,
						user_set: false,
					},
				}
			})
			.collect();
	}

	/// Handle for a cluster key, if the key is present.
	pub fn handle_of(&self, key: &ClusterKey) -> Option<ClusterHandle> {
		self.entries
			.iter()
			.position(|e| e.key == *key)
			.map(|i| ClusterHandle(i as u32))
	}

	/// Whether the cluster with `key` is currently collapsed. Unknown keys
	/// are treated as expanded.
	pub fn is_collapsed(&self, key: &ClusterKey) -> bool {
		self.entries
			.iter()
			.find(|e| e.key == *key)
			.map(|e| e.collapsed)
			.unwrap_or(false)
	}

	/// Symmetric collapse/expand toggle. Marks the entry as user-controlled
	/// so later syncs leave it alone. Returns the new collapsed state, or
	/// `None` for a stale handle.
	pub fn toggle(&mut self, handle: ClusterHandle) -> Option<bool> {
		let entry = self.entries.get_mut(handle.0 as usize)?;
		entry.collapsed = !entry.collapsed;
		entry.user_set = true;
		Some(entry.collapsed)
	}

	/// Toggle by key; convenience for callers that track cluster ids.
	pub fn toggle_key(&mut self, key: &ClusterKey) -> Option<bool> {
		self.handle_of(key).and_then(|h| self.toggle(h))
	}

	/// Number of tracked clusters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no clusters are tracked.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cluster(centroid: Option<&str>, members: usize) -> BackendCluster {
		BackendCluster {
			node_ids: (0..members).map(|i| format!("n{}", i)).collect(),
			centroid_node_id: centroid.map(String::from),
			edge_count: 0,
			node_types: Default::default(),
			label: None,
		}
	}

	#[test]
	fn dense_clusters_auto_collapse() {
		let mut state = CollapseState::new();
		state.sync(&[cluster(Some("a"), 10), cluster(Some("b"), 3)]);

		assert!(state.is_collapsed(&ClusterKey::Centroid("a".into())));
		assert!(!state.is_collapsed(&ClusterKey::Centroid("b".into())));
	}

	#[test]
	fn toggle_twice_restores_original_state() {
		let mut state = CollapseState::new();
		state.sync(&[cluster(Some("a"), 10)]);

		let key = ClusterKey::Centroid("a".into());
		let handle = state.handle_of(&key).unwrap();
		let before = state.is_collapsed(&key);
		assert_eq!(state.toggle(handle), Some(!before));
		assert_eq!(state.is_collapsed(&key), !before);
		assert_eq!(state.toggle(handle), Some(before));
		assert_eq!(state.is_collapsed(&key), before);
	}

	#[test]
	fn sync_with_identical_clusters_is_a_no_op() {
		let clusters = [cluster(Some("a"), 10)];
		let mut state = CollapseState::new();
		state.sync(&clusters);

		let key = ClusterKey::Centroid("a".into());
		assert_eq!(state.toggle_key(&key), Some(false));
		assert!(!state.is_collapsed(&key));

		// Same identity: the manual expand must survive.
		state.sync(&clusters);
		assert!(!state.is_collapsed(&key));
	}

	#[test]
	fn manual_toggle_survives_recluster_when_key_persists() {
		let mut state = CollapseState::new();
		state.sync(&[cluster(Some("a"), 10)]);
		assert_eq!(state.toggle_key(&ClusterKey::Centroid("a".into())), Some(false));

		// New assignment: "a" survives, "b" is new.
		state.sync(&[cluster(Some("a"), 12), cluster(Some("b"), 9)]);
		assert!(!state.is_collapsed(&ClusterKey::Centroid("a".into())));
		assert!(state.is_collapsed(&ClusterKey::Centroid("b".into())));
	}

	#[test]
	fn centroid_less_clusters_keep_distinct_identity() {
		let mut state = CollapseState::new();
		state.sync(&[cluster(None, 9), cluster(None, 2)]);

		assert!(state.is_collapsed(&ClusterKey::Index(0)));
		assert!(!state.is_collapsed(&ClusterKey::Index(1)));
		assert_ne!(
			state.handle_of(&ClusterKey::Index(0)),
			state.handle_of(&ClusterKey::Index(1))
		);
	}

	#[test]
	fn stale_handle_toggles_nothing() {
		let mut state = CollapseState::new();
		state.sync(&[cluster(Some("a"), 10)]);
		let handle = state.handle_of(&ClusterKey::Centroid("a".into())).unwrap();
		state.sync(&[]);
		assert_eq!(state.toggle(handle), None);
	}

	#[test]
	fn custom_threshold_is_respected() {
		let mut state = CollapseState::with_threshold(3);
		state.sync(&[cluster(Some("a"), 3), cluster(Some("b"), 2)]);
		assert!(state.is_collapsed(&ClusterKey::Centroid("a".into())));
		assert!(!state.is_collapsed(&ClusterKey::Centroid("b".into())));
	}
}
