use super::{ArtifactCoordinate, Rating, RatingLabel};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Nesting limit when rendering the tree as nested JSON
const MAX_RENDER_DEPTH: usize = 256;

/// Index of a node inside its owning [`DependencyTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Canonical node for one artifact coordinate
///
/// `parent` is a coordinate label resolved through the owning tree's index,
/// never an owning reference, so the structure stays acyclic even when the
/// build graph is not.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyTreeNode {
    artifact: ArtifactCoordinate,
    version: String,
    value: f64,
    label: Option<RatingLabel>,
    confidence: f64,
    created: String,
    rating_id: String,
    rating_definition_id: String,
    model_rating_definition_id: String,
    excluded: bool,
    children: BTreeMap<ArtifactCoordinate, NodeId>,
    parent: Option<ArtifactCoordinate>,
}

impl DependencyTreeNode {
    /// Creates an undecorated node; rating fields stay at their zero values
    /// until a rating is attached.
    pub fn new(artifact: ArtifactCoordinate, version: impl Into<String>, excluded: bool) -> Self {
        Self {
            artifact,
            version: version.into(),
            value: 0.0,
            label: None,
            confidence: 0.0,
            created: String::new(),
            rating_id: String::new(),
            rating_definition_id: String::new(),
            model_rating_definition_id: String::new(),
            excluded,
            children: BTreeMap::new(),
            parent: None,
        }
    }

    pub fn artifact(&self) -> &ArtifactCoordinate {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> Option<RatingLabel> {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn rating_id(&self) -> &str {
        &self.rating_id
    }

    pub fn rating_definition_id(&self) -> &str {
        &self.rating_definition_id
    }

    pub fn model_rating_definition_id(&self) -> &str {
        &self.model_rating_definition_id
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn children(&self) -> &BTreeMap<ArtifactCoordinate, NodeId> {
        &self.children
    }

    pub fn parent(&self) -> Option<&ArtifactCoordinate> {
        self.parent.as_ref()
    }

    pub(crate) fn attach_rating(&mut self, rating: &Rating) {
        self.value = rating.value;
        self.label = rating.label;
        self.confidence = rating.confidence;
        self.created = rating.created.clone();
        self.rating_id = rating.id.clone();
        self.rating_definition_id = rating.rating_definition_id.clone();
        self.model_rating_definition_id = rating.model_rating_definition_id.clone();
    }
}

/// DependencyTree aggregate: arena of canonical nodes plus a coordinate index
///
/// Every coordinate owns exactly one slot; parents refer to children by
/// [`NodeId`], so a node reachable through several paths is one node.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    nodes: Vec<DependencyTreeNode>,
    index: HashMap<ArtifactCoordinate, NodeId>,
    root: NodeId,
}

impl DependencyTree {
    pub fn with_root(root: DependencyTreeNode) -> Self {
        let mut index = HashMap::new();
        index.insert(root.artifact.clone(), NodeId(0));
        Self {
            nodes: vec![root],
            index,
            root: NodeId(0),
        }
    }

    /// Registers a node for a coordinate that has no node yet
    ///
    /// Returns the existing id untouched if the coordinate is already known.
    pub(crate) fn insert(&mut self, node: DependencyTreeNode) -> NodeId {
        if let Some(id) = self.index.get(&node.artifact) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(node.artifact.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Links `child` under `parent` and records the parent label on the child
    ///
    /// The root never receives a parent label, even when the build graph
    /// contains an edge pointing back to it.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        let parent_coordinate = self.nodes[parent.0].artifact.clone();
        let child_coordinate = self.nodes[child.0].artifact.clone();
        self.nodes[parent.0].children.insert(child_coordinate, child);
        if child != self.root {
            self.nodes[child.0].parent = Some(parent_coordinate);
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &DependencyTreeNode {
        &self.nodes[self.root.0]
    }

    pub fn node(&self, id: NodeId) -> &DependencyTreeNode {
        &self.nodes[id.0]
    }

    pub fn id_of(&self, coordinate: &ArtifactCoordinate) -> Option<NodeId> {
        self.index.get(coordinate).copied()
    }

    pub fn get(&self, coordinate: &ArtifactCoordinate) -> Option<&DependencyTreeNode> {
        self.id_of(coordinate).map(|id| self.node(id))
    }

    /// Child node of `node` registered under `coordinate`
    pub fn child<'a>(
        &'a self,
        node: &DependencyTreeNode,
        coordinate: &str,
    ) -> Option<&'a DependencyTreeNode> {
        node.children
            .get(&ArtifactCoordinate::parse(coordinate))
            .map(|id| self.node(*id))
    }

    pub fn parent_of(&self, node: &DependencyTreeNode) -> Option<&DependencyTreeNode> {
        node.parent.as_ref().and_then(|parent| self.get(parent))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DependencyTreeNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn excluded_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.excluded).count()
    }
}

impl Serialize for DependencyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView {
            tree: self,
            id: self.root,
            ancestors: Vec::new(),
        }
        .serialize(serializer)
    }
}

/// Nested rendering of one node; a node already on the current path is
/// emitted without its children so cyclic graphs terminate.
struct NodeView<'a> {
    tree: &'a DependencyTree,
    id: NodeId,
    ancestors: Vec<NodeId>,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let expand =
            !self.ancestors.contains(&self.id) && self.ancestors.len() < MAX_RENDER_DEPTH;

        let children: BTreeMap<&ArtifactCoordinate, NodeView<'_>> = if expand {
            let mut path = self.ancestors.clone();
            path.push(self.id);
            node.children
                .iter()
                .map(|(coordinate, id)| {
                    (
                        coordinate,
                        NodeView {
                            tree: self.tree,
                            id: *id,
                            ancestors: path.clone(),
                        },
                    )
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        let mut state = serializer.serialize_struct("DependencyTreeNode", 12)?;
        state.serialize_field("artifact", &node.artifact)?;
        state.serialize_field("version", &node.version)?;
        state.serialize_field("value", &node.value)?;
        state.serialize_field("label", &node.label.map(|l| l.as_str()).unwrap_or(""))?;
        state.serialize_field("confidence", &node.confidence)?;
        state.serialize_field("created", &node.created)?;
        state.serialize_field("ratingDefinitionId", &node.rating_definition_id)?;
        state.serialize_field("modelRatingDefinitionId", &node.model_rating_definition_id)?;
        state.serialize_field("ratingId", &node.rating_id)?;
        state.serialize_field("excluded", &node.excluded)?;
        state.serialize_field("parent", &node.parent)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}
