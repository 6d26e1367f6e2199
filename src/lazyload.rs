use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::call_all::call_all;
use crate::inject::{PropPatch, add_props_to_children};
use crate::node::{
    CONTAINER_KIND, Children, Element, Listener, Node, PROP_HEIGHT, PROP_MARGIN_TOP,
    PROP_ON_LOAD, PROP_PADDING_TOP, PROP_REGION, PROP_WIDTH, PropValue, Props,
};
use crate::options::{LazyOptions, OnChangeCallback, OnLoadCallback};
use crate::state::{LazyState, RenderMode};
use crate::tracker::{RegionId, TrackerEvent, TrackerOptions, ViewportTracker};

/// Visibility and load flags, shared with listeners injected into rendered
/// trees so a child's load signal can drive the loaded transition while the
/// host owns the component by `&mut`.
struct SharedFlags {
    in_viewport: AtomicBool,
    loaded: AtomicBool,
}

impl SharedFlags {
    fn new() -> Self {
        Self {
            in_viewport: AtomicBool::new(false),
            loaded: AtomicBool::new(false),
        }
    }

    fn snapshot(&self) -> LazyState {
        LazyState {
            is_in_viewport: self.in_viewport.load(Ordering::SeqCst),
            is_loaded: self.loaded.load(Ordering::SeqCst),
        }
    }
}

/// Performs the became-loaded transition: gated on viewport presence,
/// exactly-once until reset, with `on_load` fired inside the transition.
fn try_mark_loaded(flags: &SharedFlags, on_load: Option<&OnLoadCallback>) -> bool {
    if !flags.in_viewport.load(Ordering::SeqCst) {
        return false;
    }
    if flags.loaded.swap(true, Ordering::SeqCst) {
        return false;
    }
    if let Some(cb) = on_load {
        cb();
    }
    true
}

/// The injected "mark loaded" action for trees rendered in wrapped mode.
fn load_gate(
    flags: Arc<SharedFlags>,
    on_load: Option<OnLoadCallback>,
    on_change: Option<OnChangeCallback>,
) -> Listener {
    Arc::new(move |_args: &[PropValue]| {
        if try_mark_loaded(&flags, on_load.as_ref()) {
            if let Some(cb) = &on_change {
                cb(&flags.snapshot());
            }
        }
    })
}

/// A visibility-driven render/mount state machine.
///
/// Renders a placeholder until its tracked region enters (or is about to
/// enter) the viewport, then swaps in the real children. This type is
/// headless: it produces a declarative [`Children`] tree and is driven by an
/// adapter that
/// - forwards tracker notifications via [`Self::apply_tracker_events`],
/// - dispatches child load signals to the listeners found in the rendered
///   tree (or calls [`Self::mark_loaded`] directly),
/// - re-renders whenever `on_change` fires.
pub struct LazyLoaded<T: ViewportTracker> {
    options: LazyOptions,
    tracker: T,
    region: RegionId,
    flags: Arc<SharedFlags>,
    observing: bool,
}

impl<T: ViewportTracker> LazyLoaded<T> {
    /// Creates the component and registers its region with the tracker.
    pub fn new(options: LazyOptions, tracker: T) -> Self {
        let mut lazy = Self {
            options,
            tracker,
            region: RegionId::new(),
            flags: Arc::new(SharedFlags::new()),
            observing: false,
        };
        ldebug!(
            region = lazy.region.get(),
            unmount_on_leave = lazy.options.unmount_on_leave,
            wait_for_component_load = lazy.options.wait_for_component_load,
            "LazyLoaded::new"
        );
        lazy.observe();
        lazy
    }

    pub fn options(&self) -> &LazyOptions {
        &self.options
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    /// The identity of this component's tracked region.
    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn is_in_viewport(&self) -> bool {
        self.flags.in_viewport.load(Ordering::SeqCst)
    }

    pub fn is_loaded(&self) -> bool {
        self.flags.loaded.load(Ordering::SeqCst)
    }

    /// Whether a tracker registration is currently live.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn state(&self) -> LazyState {
        self.flags.snapshot()
    }

    /// The options every registration of this component uses.
    ///
    /// `continue_tracking` is not caller tunable; it mirrors
    /// `unmount_on_leave` exactly.
    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            margin: self.options.observer_options.margin,
            threshold: self.options.observer_options.threshold,
            continue_tracking: self.options.unmount_on_leave,
        }
    }

    fn observe(&mut self) {
        let opts = self.tracker_options();
        ltrace!(region = self.region.get(), "observe");
        self.tracker.observe(self.region, &opts);
        self.observing = true;
    }

    fn release_tracking(&mut self) {
        if !self.observing {
            return;
        }
        ltrace!(region = self.region.get(), "unobserve");
        self.tracker.unobserve(self.region);
        self.observing = false;
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.flags.snapshot());
        }
    }

    /// Applies a batch of tracker notifications.
    ///
    /// Events for other regions are ignored. Within a batch, updates apply in
    /// order (last write wins); `on_change` fires at most once, at the end.
    pub fn apply_tracker_events(&mut self, events: &[TrackerEvent]) {
        let mut changed = false;
        for event in events {
            if event.region != self.region {
                continue;
            }
            ltrace!(
                region = event.region.get(),
                is_intersecting = event.is_intersecting,
                "apply_tracker_events"
            );
            if event.is_intersecting {
                changed |= self.enter_viewport();
            } else {
                changed |= self.leave_viewport();
            }
        }
        if changed {
            self.notify();
        }
    }

    /// Convenience wrapper for a single notification.
    pub fn apply_tracker_event(&mut self, event: TrackerEvent) {
        self.apply_tracker_events(core::slice::from_ref(&event));
    }

    fn enter_viewport(&mut self) -> bool {
        if self.flags.in_viewport.swap(true, Ordering::SeqCst) {
            return false;
        }
        ldebug!(region = self.region.get(), "entered viewport");
        if !self.options.wait_for_component_load {
            // Entering view is sufficient evidence of "loaded".
            try_mark_loaded(&self.flags, self.options.on_load.as_ref());
        }
        if !self.options.unmount_on_leave {
            // One-shot tracking: nothing left to observe.
            self.release_tracking();
        }
        true
    }

    fn leave_viewport(&mut self) -> bool {
        if !self.options.unmount_on_leave {
            return false;
        }
        if !self.flags.in_viewport.swap(false, Ordering::SeqCst) {
            return false;
        }
        ldebug!(region = self.region.get(), "left viewport, resetting");
        self.flags.loaded.store(false, Ordering::SeqCst);
        // Re-register from scratch so the re-shown placeholder region is a
        // fresh registration.
        self.release_tracking();
        self.observe();
        true
    }

    /// The internal "mark loaded" action.
    ///
    /// No-op unless the region is in the viewport; fires `on_load` exactly
    /// once per became-loaded transition. Rendered trees reach this through
    /// the listener injected under [`PROP_ON_LOAD`].
    pub fn mark_loaded(&mut self) {
        if try_mark_loaded(&self.flags, self.options.on_load.as_ref()) {
            ldebug!(region = self.region.get(), "marked loaded");
            self.notify();
        }
    }

    /// The render mode for the current state.
    pub fn render_mode(&self) -> RenderMode {
        if !self.is_in_viewport() {
            return RenderMode::Placeholder;
        }
        if self.is_wrapped() {
            return RenderMode::Wrapped;
        }
        if self.options.unmount_on_leave {
            RenderMode::TrackedBare
        } else {
            RenderMode::Bare
        }
    }

    fn is_waiting_for_component_load(&self) -> bool {
        self.options.wait_for_component_load && self.options.on_load.is_some()
    }

    fn is_wrapped(&self) -> bool {
        self.options.show_wrapper
            || self.is_waiting_for_component_load()
            || (self.options.unmount_on_leave && self.options.children.is_plain_text())
            || self.options.children.count() > 1
    }

    /// Produces the tree for the current state.
    ///
    /// Pure: call it after every `on_change` and hand the result to the host
    /// renderer.
    pub fn render(&self) -> Children {
        match self.render_mode() {
            RenderMode::Placeholder => Children::from(self.placeholder_region(true)),
            RenderMode::Bare => self.options.children.clone(),
            RenderMode::TrackedBare => {
                let patch = PropPatch::Value(Props::new().with(PROP_REGION, self.region));
                add_props_to_children(&self.options.children, &patch)
            }
            RenderMode::Wrapped => self.render_wrapped(),
        }
    }

    fn render_wrapped(&self) -> Children {
        let prepared = if self.is_waiting_for_component_load() {
            add_props_to_children(&self.options.children, &self.load_patch())
        } else {
            self.options.children.clone()
        };

        let mut nodes: Vec<Node> = Vec::new();
        if !self.is_loaded() {
            // Placeholder and children render concurrently so the content can
            // mount and signal its own completion while the placeholder is
            // still visible.
            nodes.push(Node::Element(self.placeholder_region(false)));
        }
        nodes.extend(prepared.into_nodes());

        // 1-unit top padding offset by an equal negative margin: keeps the
        // wrapper participating in block layout without shifting siblings,
        // so its bounding box is detectable before content is measured.
        let mut wrapper = Element::new(CONTAINER_KIND)
            .with_prop(PROP_PADDING_TOP, 1i64)
            .with_prop(PROP_MARGIN_TOP, -1i64);
        if self.options.unmount_on_leave {
            wrapper.props.insert(PROP_REGION, self.region);
        }
        wrapper.children = Children::Many(nodes);
        Children::from(wrapper)
    }

    fn placeholder_region(&self, tracked: bool) -> Element {
        let mut el = Element::new(CONTAINER_KIND);
        if tracked {
            el.props.insert(PROP_REGION, self.region);
        }
        if let Some(width) = &self.options.width {
            el.props.insert(PROP_WIDTH, width.clone());
        }
        if let Some(height) = &self.options.height {
            el.props.insert(PROP_HEIGHT, height.clone());
        }
        if let Some(placeholder) = &self.options.placeholder {
            el.children = Children::from(placeholder.clone());
        }
        el
    }

    /// Builds the per-child load-completion chain for wrapped waiting mode:
    /// the gate (mark loaded, then the caller's `on_load`), then whatever
    /// listener the child already declared. Rebuilt fresh on every render
    /// from the current configuration.
    fn load_patch(&self) -> PropPatch {
        let flags = Arc::clone(&self.flags);
        let on_load = self.options.on_load.clone();
        let on_change = self.options.on_change.clone();
        PropPatch::derive(move |child: &Element| {
            let gate = load_gate(Arc::clone(&flags), on_load.clone(), on_change.clone());
            let chained = call_all([Some(gate), child.on_load().cloned()]);
            Props::new().with(PROP_ON_LOAD, chained)
        })
    }
}

impl<T: ViewportTracker> Drop for LazyLoaded<T> {
    fn drop(&mut self) {
        // A live registration is a scoped resource; release it with the node.
        self.release_tracking();
    }
}

impl<T: ViewportTracker> core::fmt::Debug for LazyLoaded<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyLoaded")
            .field("region", &self.region)
            .field("state", &self.flags.snapshot())
            .field("observing", &self.observing)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
