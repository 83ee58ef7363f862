use carousel::{Carousel, CarouselOptions};

use crate::{Easing, Tween};

/// A framework-neutral controller that wraps a [`carousel::Carousel`] and provides
/// common adapter workflows (release snapping, tween-driven scrolling).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_pan_begin` / `on_pan_update` / `on_pan_end` when gesture events occur
/// - `tick(now_ms)` each frame/timer tick (for tween scrolling)
///
/// The offset returned from `tick()` is what a UI layer should apply to its real
/// transform/scroll position; the carousel state stays in sync as a side effect.
#[derive(Clone, Debug)]
pub struct Controller {
    c: Carousel,
    tween: Option<Tween>,
    duration_ms: u64,
    easing: Easing,
    paging_enabled: bool,
    snap_enabled: bool,
}

impl Controller {
    pub fn new(options: CarouselOptions) -> Self {
        Self {
            c: Carousel::new(options),
            tween: None,
            duration_ms: 500,
            easing: Easing::EaseOutQuart,
            paging_enabled: true,
            snap_enabled: true,
        }
    }

    pub fn from_carousel(c: Carousel) -> Self {
        Self {
            c,
            tween: None,
            duration_ms: 500,
            easing: Easing::EaseOutQuart,
            paging_enabled: true,
            snap_enabled: true,
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.c
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.c
    }

    pub fn into_carousel(self) -> Carousel {
        self.c
    }

    /// Duration of snap/programmatic scroll animations.
    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// When enabled, a release never travels more than one page per swipe.
    pub fn set_paging_enabled(&mut self, paging_enabled: bool) {
        self.paging_enabled = paging_enabled;
    }

    /// When enabled (and paging is off), a release snaps to the nearest page.
    pub fn set_snap_enabled(&mut self, snap_enabled: bool) {
        self.snap_enabled = snap_enabled;
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Call this when the gesture recognizer reports a pan begin.
    ///
    /// This cancels any active tween; the finger owns the offset now.
    pub fn on_pan_begin(&mut self) {
        self.cancel_animation();
        self.c.begin_pan();
    }

    /// Forwards a cumulative pan translation for this frame.
    pub fn on_pan_update(&mut self, pan_translation: f64) {
        self.c.update_pan(pan_translation);
    }

    /// Call this when the gesture recognizer reports a release.
    ///
    /// `pan_translation` is the final cumulative translation, `velocity` the release
    /// velocity in offset units per second. Starts the settle tween and returns its
    /// target offset:
    /// - paging: at most one page away from the page the drag started from, and only
    ///   when the release velocity points the same way as the drag;
    /// - snapping: the nearest page to a velocity-adjusted release position, so a
    ///   quick flick can indicate a far-off page;
    /// - neither: the carousel settles where it was released.
    pub fn on_pan_end(&mut self, pan_translation: f64, velocity: f64, now_ms: u64) -> f64 {
        let origin = self.c.end_pan();
        if self.c.count() == 0 || self.c.item_size() == 0.0 {
            return origin;
        }
        let size = self.c.item_size();

        // A flick carries the settle point past the release position.
        let next_page = -((origin + velocity * 2.0) / size).round() as i64;

        let target = if self.paging_enabled {
            // Step direction implied by the drag itself.
            let step: i64 = if pan_translation >= 0.0 { -1 } else { 1 };
            let page = if step < 0 {
                (-origin / size).ceil() as i64
            } else {
                (-origin / size).floor() as i64
            };
            let velocity_direction: i64 = if velocity > 0.0 {
                -1
            } else if velocity < 0.0 {
                1
            } else {
                0
            };

            if page == next_page || velocity_direction != step {
                // Velocity was insufficient to overcome the distance to the next
                // page; settle gently back onto the current one.
                self.c.offset_for_page(page)
            } else {
                self.c.offset_for_page(page + step)
            }
        } else if self.snap_enabled {
            self.c.offset_for_page(next_page)
        } else {
            origin
        };

        self.start_tween_to_offset(target, now_ms)
    }

    /// Advances the controller.
    ///
    /// If a tween is active, commits the sampled offset into the carousel and
    /// returns it; otherwise returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let tween = self.tween?;

        let off = tween.sample(now_ms);
        self.c.set_offset(off);

        if tween.is_done(now_ms) {
            self.tween = None;
        }

        Some(self.c.offset())
    }

    /// Jumps to an index immediately (no animation). Returns the applied offset.
    pub fn jump_to_index(&mut self, index: usize) -> f64 {
        self.cancel_animation();
        self.c.scroll_to_index(index)
    }

    /// Starts a tween to a logical index, moving by relative steps so the loop
    /// winding is preserved. Returns the target offset.
    pub fn scroll_to_index(&mut self, index: usize, now_ms: u64) -> f64 {
        let to = self.c.offset_for_index(index);
        self.start_tween_to_offset(to, now_ms)
    }

    /// Starts a tween one page forward. Returns the target offset.
    pub fn next(&mut self, now_ms: u64) -> f64 {
        self.advance(1, now_ms)
    }

    /// Starts a tween one page backward. Returns the target offset.
    pub fn prev(&mut self, now_ms: u64) -> f64 {
        self.advance(-1, now_ms)
    }

    /// Starts a tween by a signed number of whole pages.
    ///
    /// In bounded mode, moves that would leave the travel range are ignored and the
    /// current offset is returned.
    pub fn advance(&mut self, pages: i64, now_ms: u64) -> f64 {
        if self.c.count() == 0 {
            return self.c.offset();
        }
        if !self.c.looping() {
            if pages > 0 && self.c.index() + 1 >= self.c.count() {
                return self.c.offset();
            }
            if pages < 0 && self.c.index() == 0 {
                return self.c.offset();
            }
        }
        let to = self.c.offset_for_page(self.c.current_page() + pages);
        self.start_tween_to_offset(to, now_ms)
    }

    /// Starts a tween to an offset (adapter-driven). Returns the target offset.
    pub fn start_tween_to_offset(&mut self, offset: f64, now_ms: u64) -> f64 {
        let from = self.c.offset();
        self.tween = Some(Tween::new(from, offset, now_ms, self.duration_ms, self.easing));
        offset
    }
}
