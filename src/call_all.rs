use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Listener, PropValue};

/// Combines an ordered sequence of optional listeners into one listener.
///
/// The returned listener invokes every present entry, in order, with the same
/// arguments, ignoring return values. Absent entries are skipped. There is no
/// isolation between entries: a panicking listener prevents the ones after it
/// from running.
pub fn call_all(fns: impl IntoIterator<Item = Option<Listener>>) -> Listener {
    let fns: Vec<Listener> = fns.into_iter().flatten().collect();
    Arc::new(move |args: &[PropValue]| {
        for f in &fns {
            f(args);
        }
    })
}
