use alloc::sync::Arc;
use core::cell::Cell;

use crate::math;
use crate::{
    CarouselOptions, FrameState, IndexChange, LayoutState, ScrollDirection, ScrollState,
};

/// A headless carousel engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by forwarding pan gestures, animation commits, and
///   configuration changes.
/// - It owns exactly one accumulated offset; the logical index is always re-derived
///   from it, never stored independently of it.
///
/// All updates run synchronously inside whatever frame callback the host uses; the
/// engine never blocks, allocates on the hot path, or spawns work. One instance
/// expects one logical writer (see the crate docs for the serialization contract).
///
/// For tween-driven scrolling and release snapping, see the `carousel-adapter` crate.
#[derive(Clone, Debug)]
pub struct Carousel {
    options: CarouselOptions,
    offset: f64,
    index: usize,
    previous_index: usize,
    pan_start_offset: Option<f64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Carousel {
    /// Creates a new carousel from options.
    ///
    /// The offset starts at `options.initial_offset` when set, otherwise at the
    /// position of `options.initial_index`.
    pub fn new(options: CarouselOptions) -> Self {
        let offset = Self::initial_offset_of(&options);
        cdebug!(
            count = options.count,
            looping = options.looping,
            enabled = options.enabled,
            "Carousel::new"
        );
        let mut c = Self {
            offset,
            index: 0,
            previous_index: 0,
            pan_start_offset: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        c.index = c.derive_index();
        c.previous_index = c.index;
        c
    }

    fn initial_offset_of(options: &CarouselOptions) -> f64 {
        match options.initial_offset {
            Some(v) => v,
            None => -(options.initial_index as f64 * options.item_size).abs(),
        }
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    fn reset_to_initial(&mut self) {
        self.offset = Self::initial_offset_of(&self.options);
        self.pan_start_offset = None;
        self.refresh_index();
    }

    pub fn set_options(&mut self, options: CarouselOptions) {
        let prev_count = self.options.count;
        let prev_size = self.options.item_size;
        let was_enabled = self.options.enabled;
        self.options = options;
        ctrace!(
            count = self.options.count,
            looping = self.options.looping,
            enabled = self.options.enabled,
            "Carousel::set_options"
        );

        if !self.options.enabled || !was_enabled {
            self.reset_to_initial();
        } else {
            if self.options.item_size != prev_size {
                self.offset =
                    math::offset_after_size_change(self.offset, prev_size, self.options.item_size);
            }
            if self.options.count != prev_count {
                self.reconcile_count(prev_count);
            }
            self.refresh_index();
        }

        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    ///
    /// This is useful when you want to update multiple options at once while letting
    /// the carousel decide what needs to be reconciled (offset rescale/length change).
    pub fn update_options(&mut self, f: impl FnOnce(&mut CarouselOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Carousel, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_index_change(
        &mut self,
        on_index_change: Option<impl Fn(IndexChange) + Send + Sync + 'static>,
    ) {
        self.options.on_index_change = on_index_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_panning());
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// This is recommended for UI adapters: on a typical frame you might apply a pan
    /// update and a size change together. Without batching, each setter may trigger
    /// `on_change`, which can be expensive if the callback drives rendering.
    ///
    /// `on_index_change` is *not* coalesced: index transitions fire immediately so
    /// subscribers see every transition exactly once.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn original_count(&self) -> usize {
        self.options.original_count
    }

    pub fn item_size(&self) -> f64 {
        self.options.item_size
    }

    pub fn looping(&self) -> bool {
        self.options.looping
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.reset_to_initial();
        self.notify();
    }

    /// The accumulated scroll offset, in the same unit as `item_size`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The current logical index, in `[0, original_count)`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The logical index before the most recent transition.
    pub fn previous_index(&self) -> usize {
        self.previous_index
    }

    /// The current and previous logical index as one value.
    pub fn index_change(&self) -> IndexChange {
        IndexChange {
            index: self.index,
            previous_index: self.previous_index,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.pan_start_offset.is_some()
    }

    /// The pan-start offset captured by [`Self::begin_pan`], while a pan is active.
    pub fn pan_start_offset(&self) -> Option<f64> {
        self.pan_start_offset
    }

    /// Maximum offset magnitude permitted in bounded mode.
    pub fn travel_limit(&self) -> f64 {
        math::travel_limit(self.options.count, self.options.item_size)
    }

    /// The direction encoded by the current offset's sign.
    pub fn direction(&self) -> ScrollDirection {
        ScrollDirection::from_offset(self.offset)
    }

    /// Starts a pan gesture, capturing the current offset as the pan origin.
    pub fn begin_pan(&mut self) {
        if !self.options.enabled {
            return;
        }
        ctrace!(offset = self.offset, "begin_pan");
        self.pan_start_offset = Some(self.offset);
        self.notify();
    }

    /// Applies a cumulative pan translation (since gesture-begin) for this frame.
    ///
    /// Routes through the gesture clamp: unbounded in loop mode, hard clamped or
    /// rubber-banded in bounded mode. Ignored when no pan is active: the gesture
    /// recognizer may deliver an update before `begin_pan` has landed, and applying
    /// it against a stale origin would cause a visible flicker.
    pub fn update_pan(&mut self, pan_translation: f64) {
        if !self.options.enabled {
            return;
        }
        let Some(pan_start) = self.pan_start_offset else {
            cwarn!(pan_translation, "update_pan without an active pan");
            return;
        };
        let next = math::clamp_pan_translation(
            self.options.looping,
            self.options.overscroll_enabled,
            self.offset,
            pan_start,
            pan_translation,
            self.travel_limit(),
        );
        self.apply_offset(next);
    }

    /// Ends the pan gesture and returns the frozen offset.
    ///
    /// The returned value is what the animation layer should settle from (e.g. into a
    /// snap or decay animation); the engine itself stays at the released position
    /// until a commit via [`Self::set_offset`].
    pub fn end_pan(&mut self) -> f64 {
        if self.pan_start_offset.take().is_some() {
            ctrace!(offset = self.offset, "end_pan");
            self.notify();
        }
        self.offset
    }

    /// Commits an offset produced outside the engine (an animation frame or a settled
    /// programmatic scroll).
    pub fn set_offset(&mut self, offset: f64) {
        if !self.options.enabled {
            return;
        }
        self.apply_offset(offset);
    }

    fn apply_offset(&mut self, offset: f64) {
        if self.offset == offset {
            return;
        }
        self.offset = offset;
        self.refresh_index();
        self.notify();
    }

    /// Re-derives the logical index from the current offset and fires
    /// `on_index_change` when it moved.
    fn refresh_index(&mut self) {
        let next = self.derive_index();
        if next == self.index {
            return;
        }
        self.previous_index = self.index;
        self.index = next;
        ctrace!(
            index = self.index,
            previous_index = self.previous_index,
            "index transition"
        );
        if let Some(cb) = self.options.on_index_change.clone() {
            cb(IndexChange {
                index: self.index,
                previous_index: self.previous_index,
            });
        }
    }

    fn derive_index(&self) -> usize {
        if self.options.item_size == 0.0 {
            // Not yet measured: keep whatever index we had rather than pushing a
            // zero size through the arithmetic.
            return self.index;
        }
        math::index_from_offset(
            self.offset,
            self.options.item_size,
            self.options.count,
            self.options.looping,
            self.options.original_count,
        )
    }

    /// Applies a new item size, rescaling the offset proportionally so the logical
    /// index is preserved.
    ///
    /// A previous size of `0.0` ("not yet measured") applies the new size without
    /// rescaling.
    pub fn set_item_size(&mut self, item_size: f64) {
        if self.options.item_size == item_size {
            return;
        }
        let previous = self.options.item_size;
        self.options.item_size = item_size;
        self.offset = math::offset_after_size_change(self.offset, previous, item_size);
        cdebug!(previous, item_size, offset = self.offset, "set_item_size");
        self.refresh_index();
        self.notify();
    }

    /// Applies a new dataset length, reconciling the offset so the visible item stays
    /// visible (or snapping to the last slot when the set shrank past it).
    pub fn set_count(&mut self, count: usize) {
        self.set_counts(count, count);
    }

    /// Like [`Self::set_count`], but with a distinct pre-padding length for looping
    /// datasets of 1 or 2 items.
    pub fn set_counts(&mut self, count: usize, original_count: usize) {
        if self.options.count == count && self.options.original_count == original_count {
            return;
        }
        let previous = self.options.count;
        self.options.count = count;
        self.options.original_count = original_count;
        if previous != count {
            self.reconcile_count(previous);
        }
        self.refresh_index();
        self.notify();
    }

    fn reconcile_count(&mut self, previous_count: usize) {
        if self.options.item_size == 0.0 {
            return;
        }
        let direction = ScrollDirection::from_offset(self.offset);
        self.offset = math::offset_after_length_change(
            direction,
            self.offset,
            self.options.item_size,
            previous_count,
            self.options.count,
        );
        if !self.options.looping {
            // Bounded mode: the reconciled offset must stay inside the new travel
            // range, there is no later animation pass to pull it back.
            self.offset = self.offset.max(-self.travel_limit()).min(0.0);
        }
        cdebug!(
            previous_count,
            count = self.options.count,
            offset = self.offset,
            "reconcile_count"
        );
    }

    /// The page the carousel currently sits on, rounded to the nearest whole item.
    ///
    /// In loop mode this counts windings, so it can be negative or exceed `count`;
    /// in bounded mode it equals the rounded logical index.
    pub fn current_page(&self) -> i64 {
        if self.options.count == 0 || self.options.item_size == 0.0 {
            return 0;
        }
        if self.options.looping {
            return -(self.offset / self.options.item_size).round() as i64;
        }
        let len = self.options.count as f64;
        let fixed = (self.offset / self.options.item_size) % len;
        let page = if self.offset <= 0.0 {
            fixed.abs()
        } else if fixed > 0.0 {
            (len - fixed).abs()
        } else {
            0.0
        };
        page.round() as i64
    }

    /// The offset at which `page` sits exactly under the viewport.
    ///
    /// Clamped into the travel range in bounded mode.
    pub fn offset_for_page(&self, page: i64) -> f64 {
        let target = -(page as f64) * self.options.item_size;
        if self.options.looping {
            target
        } else {
            target.max(-self.travel_limit()).min(0.0)
        }
    }

    /// The offset that reaches `index` by relative steps from the current position,
    /// preserving the loop winding (no multi-cycle rewind when wrapping).
    pub fn offset_for_index(&self, index: usize) -> f64 {
        let steps = self.index as f64 - index as f64;
        let target = self.offset + steps * self.options.item_size;
        if self.options.looping {
            target
        } else {
            target.max(-self.travel_limit()).min(0.0)
        }
    }

    /// Programmatically scrolls to a logical index (no animation).
    ///
    /// Returns the applied offset. For animated jumps, compute the target with
    /// [`Self::offset_for_index`] and drive the animation through an adapter, then
    /// commit via [`Self::set_offset`].
    pub fn scroll_to_index(&mut self, index: usize) -> f64 {
        if !self.options.enabled || self.options.count == 0 {
            return self.offset;
        }
        let target = self.offset_for_index(index);
        self.apply_offset(target);
        self.offset
    }

    /// Advances one page forward (no animation). Returns the applied offset.
    pub fn next(&mut self) -> f64 {
        self.advance(1)
    }

    /// Steps one page backward (no animation). Returns the applied offset.
    pub fn prev(&mut self) -> f64 {
        self.advance(-1)
    }

    /// Moves by a signed number of whole pages (no animation).
    ///
    /// In bounded mode, moves that would leave the travel range are ignored.
    pub fn advance(&mut self, pages: i64) -> f64 {
        if !self.options.enabled || self.options.count == 0 {
            return self.offset;
        }
        if !self.options.looping {
            if pages > 0 && self.index + 1 >= self.options.count {
                return self.offset;
            }
            if pages < 0 && self.index == 0 {
                return self.offset;
            }
        }
        let target = self.offset_for_page(self.current_page() + pages);
        self.apply_offset(target);
        self.offset
    }

    /// Returns a lightweight snapshot of the current layout configuration.
    pub fn layout_state(&self) -> LayoutState {
        LayoutState {
            item_size: self.options.item_size,
            count: self.options.count,
            original_count: self.options.original_count,
        }
    }

    /// Returns a lightweight snapshot of the current scroll position.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset,
        }
    }

    /// Returns a combined snapshot of layout + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            layout: self.layout_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores a previously captured snapshot verbatim.
    ///
    /// No reconciliation runs: the snapshot's layout and offset are assumed to be
    /// mutually consistent, and the logical index is re-derived from them. Any active
    /// pan is cancelled.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|c| {
            c.options.item_size = frame.layout.item_size;
            c.options.count = frame.layout.count;
            c.options.original_count = frame.layout.original_count;
            c.offset = frame.scroll.offset;
            c.pan_start_offset = None;
            c.refresh_index();
            c.notify();
        });
    }
}
