//! The sample tree: node storage, stage registration, leaf propagation and
//! summary conversion.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::registry::{is_completed_status, Stage};
use crate::source::Principal;
use crate::tree::{Completion, ProjectSample, RecordId, StageTracker, WorkflowSample};

/// The tree of workflow samples descending from one top-level request.
///
/// Nodes live in an id→node map; parent links are id back-references into
/// that map, so the map is the single owner of every node. Stage trackers
/// are keyed by [`Stage`], whose ordering is the canonical stage order, so
/// iterating the tracker map always yields stages in pipeline order.
#[derive(Debug, Clone)]
pub struct SampleTree {
    root: Option<RecordId>,
    samples: HashMap<RecordId, WorkflowSample>,
    stages: BTreeMap<Stage, StageTracker>,
    principal: Principal,
}

impl SampleTree {
    /// Creates an empty tree for the given principal. The root is set when
    /// the parentless record is added.
    #[must_use]
    pub fn new(principal: Principal) -> Self {
        Self {
            root: None,
            samples: HashMap::new(),
            stages: BTreeMap::new(),
            principal,
        }
    }

    /// Returns the root node, if one has been set.
    #[must_use]
    pub fn root(&self) -> Option<&WorkflowSample> {
        self.samples.get(&self.root?)
    }

    /// Marks the given record as the tree root.
    pub fn set_root(&mut self, record_id: RecordId) {
        self.root = Some(record_id);
    }

    /// Returns the principal the tree is computed for.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Inserts a sample into the id→node map, overwriting any previous
    /// sample with the same record id.
    pub fn add_sample(&mut self, sample: WorkflowSample) {
        self.samples.insert(sample.record_id(), sample);
    }

    /// Links an existing child under an existing parent: the parent owns the
    /// child through its child list, the child keeps an id back-reference.
    pub fn link_child(&mut self, parent_id: RecordId, child_id: RecordId) {
        if !self.samples.contains_key(&child_id) {
            warn!(record_id = child_id, "cannot link a child missing from the tree");
            return;
        }
        let Some(parent) = self.samples.get_mut(&parent_id) else {
            warn!(record_id = parent_id, "cannot link under a parent missing from the tree");
            return;
        };
        parent.add_child(child_id);
        if let Some(child) = self.samples.get_mut(&child_id) {
            child.set_parent(parent_id);
        }
    }

    /// Looks up a sample by record id.
    #[must_use]
    pub fn sample(&self, record_id: RecordId) -> Option<&WorkflowSample> {
        self.samples.get(&record_id)
    }

    /// Iterates all samples in the tree, in no particular order.
    pub fn samples(&self) -> impl Iterator<Item = &WorkflowSample> {
        self.samples.values()
    }

    /// Iterates the stage trackers in canonical stage order.
    pub fn stages(&self) -> impl Iterator<Item = &StageTracker> {
        self.stages.values()
    }

    /// Registers a node's stage into its tracker, creating the tracker on
    /// first use.
    ///
    /// Nodes carrying a sentinel stage are logged and skipped: they stay in
    /// the tree but contribute nothing to stage aggregates. A single
    /// malformed node must not corrupt the aggregates for the rest of the
    /// tree.
    pub fn add_stage_to_tracked(&mut self, record_id: RecordId) {
        let Some(node) = self.samples.get(&record_id) else {
            warn!(record_id, "cannot track stage of a record missing from the tree");
            return;
        };
        let stage = node.stage();
        if stage.is_valid() {
            match self.stages.entry(stage) {
                std::collections::btree_map::Entry::Occupied(entry) => {
                    entry.into_mut().register(node);
                }
                std::collections::btree_map::Entry::Vacant(entry) => {
                    entry.insert(StageTracker::new(stage, node));
                }
            }
        } else {
            warn!(record_id, stage = %stage, "unable to determine stage for record");
        }
    }

    /// Folds one leaf observation into the tree.
    ///
    /// Precondition: the tree is fully linked and `leaf_id` names a leaf;
    /// each leaf is visited exactly once, in any order.
    ///
    /// A failed leaf walks upward marking each ancestor failed while all of
    /// that ancestor's children are failed. A single non-failed sibling
    /// anywhere on the path rescues the remaining ancestors and the walk
    /// stops; only when the walk runs off the root does the leaf's stage
    /// record a failed sample.
    ///
    /// A non-failed leaf with a completed status is marked complete and
    /// AND-folds `true` into its stage's completion flag; any other status
    /// makes the stage incomplete, and incompleteness is sticky.
    pub fn update_tree_on_leaf_status(&mut self, leaf_id: RecordId) {
        let Some(leaf) = self.samples.get(&leaf_id) else {
            warn!(record_id = leaf_id, "cannot update tree on a record missing from the tree");
            return;
        };
        let stage = leaf.stage();
        let failed = leaf.failed();
        let status_completed = is_completed_status(leaf.status());
        let mut ancestor = leaf.parent();

        if failed {
            // Fail every node on the path to the failed leaf until reaching
            // the root or a node with a non-failed child.
            while let Some(parent_id) = ancestor {
                if !self.all_children_failed(parent_id) {
                    break;
                }
                let Some(parent) = self.samples.get_mut(&parent_id) else {
                    warn!(record_id = parent_id, "parent link points outside the tree");
                    break;
                };
                parent.mark_failed();
                ancestor = parent.parent();
            }
            // The failure is attributed to the stage only when the whole
            // path to the root failed.
            if ancestor.is_none() {
                if let Some(tracker) = self.stages.get_mut(&stage) {
                    tracker.add_failed_sample();
                } else {
                    warn!(record_id = leaf_id, stage = %stage, "failed leaf has no tracked stage");
                }
            }
        } else {
            let Some(tracker) = self.stages.get_mut(&stage) else {
                warn!(record_id = leaf_id, stage = %stage, "leaf has no tracked stage");
                return;
            };
            if status_completed {
                tracker.set_complete(true);
                if let Some(leaf) = self.samples.get_mut(&leaf_id) {
                    leaf.mark_complete();
                }
            } else {
                // A pending leaf makes its stage incomplete. A failed leaf
                // does not: other branches may still complete the stage.
                tracker.set_complete(false);
            }
        }
    }

    /// Returns whether every child of the given node is failed.
    fn all_children_failed(&self, record_id: RecordId) -> bool {
        let Some(node) = self.samples.get(&record_id) else {
            return false;
        };
        node.children().iter().all(|child_id| {
            self.samples
                .get(child_id)
                .is_some_and(WorkflowSample::failed)
        })
    }

    /// Converts the fully populated tree into its summary.
    ///
    /// Read-only and idempotent. Returns `None` when no root is set.
    ///
    /// The overall failed and complete verdicts are the AND of the
    /// respective flag over every node in the tree, internal nodes
    /// included. Internal nodes are never explicitly completed by leaf
    /// propagation, so any tree with an internal node reports incomplete;
    /// that fold is kept as-is pending product clarification.
    #[must_use]
    pub fn convert_to_project_sample(&self) -> Option<ProjectSample> {
        let root = self.root?;

        let mut failed = true;
        let mut complete = true;
        for sample in self.samples.values() {
            failed = failed && sample.failed();
            complete = complete && sample.complete();
        }

        Some(ProjectSample {
            record_id: root,
            stages: self.stages.values().cloned().collect(),
            failed,
            complete,
        })
    }
}
