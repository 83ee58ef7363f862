use alloc::sync::Arc;

use crate::IndexChange;
use crate::carousel::Carousel;

/// A callback fired when a carousel state update occurs.
///
/// The second argument is `is_panning`.
pub type OnChangeCallback = Arc<dyn Fn(&Carousel, bool) + Send + Sync>;

/// A callback fired exactly once per logical index transition.
///
/// The engine remembers the previously derived index and only invokes this when the
/// freshly derived index differs, so subscribers never see duplicate notifications
/// for the same transition.
pub type OnIndexChangeCallback = Arc<dyn Fn(IndexChange) + Send + Sync>;

/// Configuration for [`crate::Carousel`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s so
/// adapters can update a few fields and call `Carousel::set_options` without
/// reallocating closures.
pub struct CarouselOptions {
    /// Number of item slots the index arithmetic runs over.
    ///
    /// When the rendering layer pads a short looping dataset (see
    /// [`Self::original_count`]), this is the length *after* padding.
    pub count: usize,

    /// The dataset length before any loop-padding.
    ///
    /// Only consulted when `looping` is on and the value is 1 or 2, where the
    /// rendering layer duplicates items so the carousel still has somewhere to
    /// scroll; derived indexes are folded back onto the distinct items.
    pub original_count: usize,

    /// Width (or height, for vertical carousels) of one item slot.
    ///
    /// A value of `0.0` means "not yet measured": index derivation is suspended and
    /// the first real size is applied without rescaling.
    pub item_size: f64,

    /// Whether the carousel wraps infinitely or is bounded at its edges.
    pub looping: bool,

    /// In bounded mode, whether dragging past an edge rubber-bands (0.5x damping)
    /// instead of hard-stopping at the boundary.
    pub overscroll_enabled: bool,

    /// Enables/disables the carousel. When disabled, events are ignored and the
    /// engine reports its initial position.
    pub enabled: bool,

    /// The logical index to start on.
    pub initial_index: usize,

    /// An explicit initial offset, overriding `initial_index` when set.
    pub initial_offset: Option<f64>,

    /// Optional callback fired when the carousel's internal state changes.
    ///
    /// The second argument indicates whether a pan gesture is in progress.
    pub on_change: Option<OnChangeCallback>,

    /// Optional callback fired once per logical index transition.
    pub on_index_change: Option<OnIndexChangeCallback>,
}

impl CarouselOptions {
    /// Creates options for a carousel over `count` items of `item_size` units each.
    pub fn new(count: usize, item_size: f64) -> Self {
        Self {
            count,
            original_count: count,
            item_size,
            looping: false,
            overscroll_enabled: true,
            enabled: true,
            initial_index: 0,
            initial_offset: None,
            on_change: None,
            on_index_change: None,
        }
    }

    pub fn with_original_count(mut self, original_count: usize) -> Self {
        self.original_count = original_count;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_overscroll_enabled(mut self, overscroll_enabled: bool) -> Self {
        self.overscroll_enabled = overscroll_enabled;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: Option<f64>) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Carousel, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_index_change(
        mut self,
        on_index_change: Option<impl Fn(IndexChange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_index_change = on_index_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for CarouselOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            original_count: self.original_count,
            item_size: self.item_size,
            looping: self.looping,
            overscroll_enabled: self.overscroll_enabled,
            enabled: self.enabled,
            initial_index: self.initial_index,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
            on_index_change: self.on_index_change.clone(),
        }
    }
}

impl core::fmt::Debug for CarouselOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("count", &self.count)
            .field("original_count", &self.original_count)
            .field("item_size", &self.item_size)
            .field("looping", &self.looping)
            .field("overscroll_enabled", &self.overscroll_enabled)
            .field("enabled", &self.enabled)
            .field("initial_index", &self.initial_index)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
