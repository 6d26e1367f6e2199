//! A headless lazy-rendering state machine.
//!
//! Renders a placeholder for a subtree until that subtree's region enters (or
//! is about to enter) the visible viewport, then swaps in the real content.
//! Optionally defers the loaded signal until the content itself reports
//! completion, and optionally tears the content back down when it leaves the
//! viewport.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - a visibility tracker (implement [`ViewportTracker`] and forward change
//!   batches as [`TrackerEvent`]s)
//! - a renderer for the declarative [`Node`] trees produced by
//!   [`LazyLoaded::render`]
//! - dispatch of child load signals to the listeners found in rendered props
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod call_all;
mod inject;
mod lazyload;
mod node;
mod options;
mod state;
mod tracker;


pub use call_all::call_all;
pub use inject::{PropPatch, add_props_to_children};
pub use lazyload::LazyLoaded;
pub use node::{
    CONTAINER_KIND, Children, Element, Listener, Node, PROP_HEIGHT, PROP_MARGIN_TOP, PROP_ON_LOAD,
    PROP_PADDING_TOP, PROP_REGION, PROP_WIDTH, PropValue, Props,
};
pub use options::{LazyOptions, OnChangeCallback, OnLoadCallback};
pub use state::{LazyState, RenderMode};
pub use tracker::{
    Margin, ObserverOptions, RegionId, TrackerEvent, TrackerOptions, ViewportTracker,
};
