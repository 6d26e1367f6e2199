/// A lightweight snapshot of the component's observable state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LazyState {
    pub is_in_viewport: bool,
    pub is_loaded: bool,
}

/// The render mode a [`crate::LazyLoaded`] produces for its current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Not in viewport: a sized, tracked region containing the placeholder.
    Placeholder,
    /// In viewport, no wrapper needed, tracking already released: the children
    /// render unchanged.
    Bare,
    /// In viewport, no wrapper needed, but leave detection still required: the
    /// tracked region is attached directly to the single child element.
    TrackedBare,
    /// A wrapper container around placeholder and/or children.
    Wrapped,
}
