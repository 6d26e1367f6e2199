use alloc::sync::Arc;

use crate::state::LazyState;
use crate::{Children, Node, ObserverOptions, PropValue};

/// A zero-argument notification fired once per became-loaded transition.
pub type OnLoadCallback = Arc<dyn Fn() + Send + Sync>;

/// A callback fired when the component's observable state changes.
///
/// This is the headless equivalent of a re-render trigger: after it fires, the
/// host should call [`crate::LazyLoaded::render`] again.
pub type OnChangeCallback = Arc<dyn Fn(&LazyState) + Send + Sync>;

/// Configuration for [`crate::LazyLoaded`].
///
/// Immutable once the component is constructed. Cheap to clone: callbacks are
/// stored in `Arc`s.
#[derive(Clone)]
pub struct LazyOptions {
    /// Content shown while the subtree is not loaded.
    pub placeholder: Option<Node>,
    /// Sizing hint applied verbatim to the placeholder region, so the region
    /// occupies layout space while the real content is absent.
    pub width: Option<PropValue>,
    pub height: Option<PropValue>,
    /// Forces a wrapping container even when not structurally required.
    pub show_wrapper: bool,
    /// Tears the content down when it leaves the viewport and re-shows the
    /// placeholder; tracking continues past the first intersection.
    pub unmount_on_leave: bool,
    /// Defers the loaded signal until the content itself reports completion.
    pub wait_for_component_load: bool,
    pub on_load: Option<OnLoadCallback>,
    pub on_change: Option<OnChangeCallback>,
    /// Pass-through tracker tuning (margin, threshold). The continuation flag
    /// is not configurable here; it always mirrors `unmount_on_leave`.
    pub observer_options: ObserverOptions,
    /// The subtree to lazily render.
    pub children: Children,
}

impl LazyOptions {
    pub fn new(children: impl Into<Children>) -> Self {
        Self {
            placeholder: None,
            width: None,
            height: None,
            show_wrapper: false,
            unmount_on_leave: false,
            wait_for_component_load: false,
            on_load: None,
            on_change: None,
            observer_options: ObserverOptions::default(),
            children: children.into(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<Node>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<PropValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<PropValue>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_show_wrapper(mut self, show_wrapper: bool) -> Self {
        self.show_wrapper = show_wrapper;
        self
    }

    pub fn with_unmount_on_leave(mut self, unmount_on_leave: bool) -> Self {
        self.unmount_on_leave = unmount_on_leave;
        self
    }

    pub fn with_wait_for_component_load(mut self, wait: bool) -> Self {
        self.wait_for_component_load = wait;
        self
    }

    pub fn with_on_load(mut self, on_load: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_load = Some(Arc::new(on_load));
        self
    }

    pub fn with_on_change(mut self, on_change: impl Fn(&LazyState) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn with_observer_options(mut self, observer_options: ObserverOptions) -> Self {
        self.observer_options = observer_options;
        self
    }
}

impl core::fmt::Debug for LazyOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyOptions")
            .field("placeholder", &self.placeholder)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("show_wrapper", &self.show_wrapper)
            .field("unmount_on_leave", &self.unmount_on_leave)
            .field("wait_for_component_load", &self.wait_for_component_load)
            .field("observer_options", &self.observer_options)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
