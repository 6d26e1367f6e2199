use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::RegionId;

#[cfg(feature = "std")]
type PropMap = HashMap<&'static str, PropValue>;
#[cfg(not(feature = "std"))]
type PropMap = BTreeMap<&'static str, PropValue>;

/// Element kind used for containers emitted by this crate (placeholder regions
/// and wrappers).
pub const CONTAINER_KIND: &str = "container";

pub const PROP_WIDTH: &str = "width";
pub const PROP_HEIGHT: &str = "height";
pub const PROP_PADDING_TOP: &str = "padding_top";
pub const PROP_MARGIN_TOP: &str = "margin_top";
/// Carries the [`RegionId`] a host should register as the tracked region.
pub const PROP_REGION: &str = "region";
/// Carries the load-completion [`Listener`] of an element.
pub const PROP_ON_LOAD: &str = "on_load";

/// A callback carried in element props.
///
/// Listeners receive a borrowed argument slice so a host can forward whatever
/// event payload it has without committing to a shape here.
pub type Listener = Arc<dyn Fn(&[PropValue]) + Send + Sync>;

/// A single prop value.
#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Region(RegionId),
    Listener(Listener),
}

impl PropValue {
    pub fn as_listener(&self) -> Option<&Listener> {
        match self {
            Self::Listener(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_region(&self) -> Option<RegionId> {
        match self {
            Self::Region(r) => Some(*r),
            _ => None,
        }
    }
}

impl core::fmt::Debug for PropValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Region(r) => f.debug_tuple("Region").field(r).finish(),
            Self::Listener(_) => f.write_str("Listener(..)"),
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Region(a), Self::Region(b)) => a == b,
            // Listeners have no structural identity; compare by pointer.
            (Self::Listener(a), Self::Listener(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(String::from(s))
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<RegionId> for PropValue {
    fn from(r: RegionId) -> Self {
        Self::Region(r)
    }
}

impl From<Listener> for PropValue {
    fn from(f: Listener) -> Self {
        Self::Listener(f)
    }
}

/// A prop bag attached to an element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props(PropMap);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a prop, replacing any previous value under the same key.
    pub fn insert(&mut self, key: &'static str, value: impl Into<PropValue>) -> &mut Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn with(mut self, key: &'static str, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: Props) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

/// A renderable element: a kind tag, a prop bag, and nested children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub kind: &'static str,
    pub props: Props,
    pub children: Children,
}

impl Element {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            props: Props::new(),
            children: Children::Empty,
        }
    }

    pub fn with_prop(mut self, key: &'static str, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    pub fn with_children(mut self, children: impl Into<Children>) -> Self {
        self.children = children.into();
        self
    }

    pub fn on_load(&self) -> Option<&Listener> {
        self.props.get(PROP_ON_LOAD).and_then(PropValue::as_listener)
    }
}

/// A node in the declarative tree handed to the host renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// A child collection: empty, a single node, or an ordered sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Children {
    #[default]
    Empty,
    Single(Box<Node>),
    Many(Vec<Node>),
}

impl Children {
    /// Number of top-level nodes.
    pub fn count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Many(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The only top-level node, if there is exactly one.
    ///
    /// A one-element `Many` is treated the same as `Single`.
    pub fn single_node(&self) -> Option<&Node> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some(node),
            Self::Many(nodes) => match nodes.as_slice() {
                [node] => Some(node),
                _ => None,
            },
        }
    }

    /// True when the collection is exactly one raw text node.
    ///
    /// Text has no element to attach a tracked region to, so callers that need
    /// an attachment point must wrap first.
    pub fn is_plain_text(&self) -> bool {
        self.single_node().is_some_and(Node::is_text)
    }

    /// The top-level nodes as a slice.
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Self::Empty => &[],
            Self::Single(node) => core::slice::from_ref(node),
            Self::Many(nodes) => nodes,
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.as_slice().iter()
    }

    /// Flattens the collection into a node vector, preserving order.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(node) => alloc::vec![*node],
            Self::Many(nodes) => nodes,
        }
    }
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Self::Single(Box::new(node))
    }
}

impl From<Element> for Children {
    fn from(el: Element) -> Self {
        Self::Single(Box::new(Node::Element(el)))
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Many(nodes)
    }
}

impl From<&str> for Children {
    fn from(s: &str) -> Self {
        Self::Single(Box::new(Node::text(s)))
    }
}
