use crate::rating_tree::domain::{
    ArtifactCoordinate, DependencyTree, DependencyTreeNode, NodeId, NumericId, ParsedGraph,
    RatingMap,
};
use crate::rating_tree::policies::ExclusionPolicy;
use std::collections::BTreeSet;

/// TreeBuilder turns a flat edge list into one canonical, rated tree
///
/// The coordinate index lives inside the returned [`DependencyTree`], so
/// every build call starts from an empty table.
pub struct TreeBuilder<'a> {
    ratings: &'a RatingMap,
    policy: &'a ExclusionPolicy,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(ratings: &'a RatingMap, policy: &'a ExclusionPolicy) -> Self {
        Self { ratings, policy }
    }

    /// Builds the tree rooted at `root` from a parsed build graph
    ///
    /// Edges are processed in input order. A node is decorated with its
    /// version, rating and exclusion flag only when it is first created;
    /// later edges reaching the same coordinate only add links.
    pub fn build(&self, graph: &ParsedGraph, root: &ArtifactCoordinate) -> DependencyTree {
        let root_version = graph.version_of(root).unwrap_or_default();
        let mut tree = DependencyTree::with_root(self.create_node(root, root_version, false));

        for edge in graph.edges() {
            let from = self.fetch_or_create(&mut tree, graph, &edge.from, edge.numeric_from);
            let to = self.fetch_or_create(&mut tree, graph, &edge.to, edge.numeric_to);
            tree.attach(from, to);
        }

        tracing::debug!(
            root = %root,
            nodes = tree.len(),
            excluded = tree.excluded_count(),
            "Built dependency tree"
        );
        tree
    }

    /// Builds a flat tree for projects without an edge graph
    ///
    /// Every rated artifact becomes a direct child of the synthesized root;
    /// test/dev membership is decided by coordinate. A rated artifact sharing
    /// the root's coordinate is not added as a child: its rating is carried
    /// by the root node itself.
    pub fn build_flat(
        &self,
        root: &ArtifactCoordinate,
        root_version: &str,
        dev_dependencies: &BTreeSet<ArtifactCoordinate>,
    ) -> DependencyTree {
        let mut tree = DependencyTree::with_root(self.create_node(root, root_version, false));
        if self.ratings.get(root).is_some() {
            tracing::debug!(
                root = %root,
                "Rated artifact shares the root coordinate; rating kept on root"
            );
        }

        for coordinate in self.ratings.coordinates().filter(|c| *c != root) {
            let is_dev = dev_dependencies.contains(coordinate);
            let child = tree.insert(self.create_node(coordinate, "", is_dev));
            tree.attach(tree.root_id(), child);
        }

        tracing::debug!(root = %root, nodes = tree.len(), "Built flat dependency tree");
        tree
    }

    fn fetch_or_create(
        &self,
        tree: &mut DependencyTree,
        graph: &ParsedGraph,
        coordinate: &ArtifactCoordinate,
        numeric_id: NumericId,
    ) -> NodeId {
        if let Some(id) = tree.id_of(coordinate) {
            return id;
        }
        let version = graph
            .version_of(coordinate)
            .or_else(|| graph.artifact(numeric_id).map(|meta| meta.version.as_str()))
            .unwrap_or_default();
        let is_dev = graph.dev_dependencies().contains(&numeric_id);
        tree.insert(self.create_node(coordinate, version, is_dev))
    }

    fn create_node(
        &self,
        coordinate: &ArtifactCoordinate,
        version: &str,
        is_dev: bool,
    ) -> DependencyTreeNode {
        let excluded = self.policy.is_excluded(coordinate, self.ratings, is_dev);
        let mut node = DependencyTreeNode::new(coordinate.clone(), version, excluded);
        if let Some(rating) = self.ratings.get(coordinate) {
            node.attach_rating(rating);
        }
        if excluded {
            tracing::debug!(artifact = %coordinate, "Excluded artifact from rating compliance");
        }
        node
    }
}
