use core::sync::atomic::{AtomicU64, Ordering};

/// Identity of a tracked renderable region.
///
/// The id is opaque: a host attaches it to whatever on-screen element carries
/// the [`crate::PROP_REGION`] prop and reports intersection changes for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(u64);

static NEXT_REGION_ID: AtomicU64 = AtomicU64::new(1);

impl RegionId {
    /// Allocates a fresh, process-unique id.
    pub fn new() -> Self {
        Self(NEXT_REGION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-fetch margin around the viewport, uniform in all directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Margin {
    /// Percent of the viewport size. `Percent(100)` extends the tracked area by
    /// one full viewport in every direction.
    Percent(u16),
    Px(u32),
}

impl Default for Margin {
    fn default() -> Self {
        Self::Percent(100)
    }
}

/// Caller-facing tracker tuning.
///
/// This intentionally excludes the tracking-continuation flag: the component
/// derives that from its own configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverOptions {
    pub margin: Margin,
    /// Intersection ratio at which a region counts as visible (`0.0` = any
    /// overlap).
    pub threshold: f32,
}

impl ObserverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Full per-registration options handed to a [`ViewportTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerOptions {
    pub margin: Margin,
    pub threshold: f32,
    /// Keep observing after the first intersection (needed for leave events).
    pub continue_tracking: bool,
}

/// One entry of an asynchronous tracker notification batch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerEvent {
    pub region: RegionId,
    pub is_intersecting: bool,
}

impl TrackerEvent {
    pub fn new(region: RegionId, is_intersecting: bool) -> Self {
        Self {
            region,
            is_intersecting,
        }
    }
}

/// The visibility-detection capability consumed by this crate.
///
/// Implementations wrap whatever the host platform provides (an intersection
/// observer, a scroll-position calculation, a test stub). Change notifications
/// flow back through the adapter as [`TrackerEvent`] batches; this trait only
/// covers registration.
pub trait ViewportTracker {
    fn observe(&mut self, region: RegionId, options: &TrackerOptions);
    fn unobserve(&mut self, region: RegionId);
}

impl<T: ViewportTracker + ?Sized> ViewportTracker for &mut T {
    fn observe(&mut self, region: RegionId, options: &TrackerOptions) {
        (**self).observe(region, options);
    }

    fn unobserve(&mut self, region: RegionId) {
        (**self).unobserve(region);
    }
}
