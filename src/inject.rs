use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Children, Element, Node, Props};

/// Props to merge into children: either a fixed bag applied to every child, or
/// a per-child derivation (called once per child, e.g. to compose with a
/// listener the child already declares).
#[derive(Clone)]
pub enum PropPatch {
    Value(Props),
    Derive(Arc<dyn Fn(&Element) -> Props + Send + Sync>),
}

impl PropPatch {
    pub fn derive(f: impl Fn(&Element) -> Props + Send + Sync + 'static) -> Self {
        Self::Derive(Arc::new(f))
    }

    fn resolve(&self, child: &Element) -> Props {
        match self {
            Self::Value(props) => props.clone(),
            Self::Derive(f) => f(child),
        }
    }
}

impl From<Props> for PropPatch {
    fn from(props: Props) -> Self {
        Self::Value(props)
    }
}

impl core::fmt::Debug for PropPatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(props) => f.debug_tuple("Value").field(props).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Returns a new collection of the same shape and order, each element child
/// recreated with its props extended by the patch. Input nodes are never
/// mutated.
///
/// Prop injection is only defined for element nodes. A text node cannot carry
/// props; encountering one is a caller contract violation and the node is
/// passed through unchanged.
pub fn add_props_to_children(children: &Children, patch: &PropPatch) -> Children {
    match children {
        Children::Empty => Children::Empty,
        Children::Single(node) => Children::Single(Box::new(patch_node(node, patch))),
        Children::Many(nodes) => {
            let patched: Vec<Node> = nodes.iter().map(|n| patch_node(n, patch)).collect();
            Children::Many(patched)
        }
    }
}

fn patch_node(node: &Node, patch: &PropPatch) -> Node {
    match node {
        Node::Element(el) => {
            let mut next = el.clone();
            next.props.merge(patch.resolve(el));
            Node::Element(next)
        }
        Node::Text(s) => {
            lwarn!("add_props_to_children: cannot inject props into a text node");
            debug_assert!(false, "add_props_to_children: text nodes cannot carry props");
            Node::Text(s.clone())
        }
    }
}
