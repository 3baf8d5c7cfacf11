//! Arena-backed element tree.

/// Handle to an element in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Element payload: tag name, optional id, classes, parent link.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
	pub tag: String,
	pub id: Option<String>,
	pub classes: Vec<String>,
	pub parent: Option<NodeId>,
}

/// Flat arena of elements; ids are indices.
#[derive(Debug, Default)]
pub(crate) struct DocTree {
	nodes: Vec<ElementData>,
}

impl DocTree {
	pub fn insert(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(ElementData {
			tag: tag.to_string(),
			id: None,
			classes: Vec::new(),
			parent,
		});
		id
	}

	pub fn get(&self, node: NodeId) -> &ElementData {
		&self.nodes[node.0]
	}

	pub fn get_mut(&mut self, node: NodeId) -> &mut ElementData {
		&mut self.nodes[node.0]
	}

	/// Path from `node` up to the root, inclusive.
	pub fn ancestor_path(&self, node: NodeId) -> Vec<NodeId> {
		let mut path = vec![node];
		let mut cursor = node;
		while let Some(parent) = self.get(cursor).parent {
			path.push(parent);
			cursor = parent;
		}
		path
	}
}
