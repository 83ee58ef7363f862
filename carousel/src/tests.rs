use crate::*;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::math::{
    clamp_pan_translation, fold_padded_index, index_from_offset, offset_after_length_change,
    offset_after_size_change, travel_limit,
};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    /// A uniform-ish float in `[start, end)` with quarter-unit granularity, so sweeps
    /// hit fractional positions without ever landing on an exact .5 rounding tie.
    fn gen_offset(&mut self, start: i64, end_exclusive: i64) -> f64 {
        let q = self.gen_range_u64(0, ((end_exclusive - start) * 4) as u64);
        start as f64 + q as f64 * 0.25 + 0.05
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

// --- gesture clamp ---------------------------------------------------------

#[test]
fn clamp_hard_stops_right_overdrag_without_overscroll() {
    let next = clamp_pan_translation(false, false, 0.0, 0.0, 120.0, 500.0);
    assert_eq!(next, 0.0);
}

#[test]
fn clamp_damps_drag_past_start_with_overscroll() {
    // boundary = 0, fixed = 0, dynamic = 120 => 0 + 120 * 0.5
    let next = clamp_pan_translation(false, true, 20.0, 0.0, 120.0, 500.0);
    assert_eq!(next, 60.0);
}

#[test]
fn clamp_damps_drag_past_end_with_overscroll() {
    // boundary = -max = -500, fixed = -500 - (-500) = 0, dynamic = -100
    // result = -500 + (-100 * 0.5) = -550
    let next = clamp_pan_translation(false, true, -600.0, -500.0, -100.0, 500.0);
    assert_eq!(next, -550.0);
}

#[test]
fn clamp_passes_raw_value_through_in_loop_mode() {
    let next = clamp_pan_translation(true, false, 0.0, 0.0, 300.0, 500.0);
    assert_eq!(next, 300.0);
}

#[test]
fn clamp_passes_raw_value_through_inside_bounds() {
    let next = clamp_pan_translation(false, true, -200.0, -100.0, -50.0, 500.0);
    assert_eq!(next, -150.0);
}

#[test]
fn clamp_result_stays_in_travel_range_without_overscroll() {
    let mut rng = Lcg::new(7);
    for _ in 0..2000 {
        let limit = rng.gen_range_u64(0, 2000) as f64;
        let current = rng.gen_offset(-3000, 3000);
        let pan_start = rng.gen_offset(-3000, 3000);
        let translation = rng.gen_offset(-4000, 4000);
        let next = clamp_pan_translation(false, false, current, pan_start, translation, limit);
        assert!(next <= 0.0, "next={next} limit={limit}");
        assert!(next >= -limit, "next={next} limit={limit}");
    }
}

#[test]
fn clamp_collapses_to_a_point_for_a_single_item() {
    // travel_limit = 0: the only valid resting offset is 0.
    assert_eq!(travel_limit(1, 300.0), 0.0);
    for translation in [-500.0, -1.0, 0.0, 1.0, 500.0] {
        let next = clamp_pan_translation(false, false, 0.0, 0.0, translation, 0.0);
        assert_eq!(next, 0.0);
    }
}

// --- index derivation ------------------------------------------------------

#[test]
fn index_is_deterministic_under_reevaluation() {
    let mut rng = Lcg::new(42);
    for _ in 0..2000 {
        let count = rng.gen_range_usize(1, 12);
        let size = rng.gen_range_u64(1, 900) as f64;
        let looping = rng.gen_bool();
        let offset = rng.gen_offset(-20_000, 20_000);
        let a = index_from_offset(offset, size, count, looping, count);
        let b = index_from_offset(offset, size, count, looping, count);
        assert_eq!(a, b);
        assert!(a < count);
    }
}

#[test]
fn index_tracks_whole_pages() {
    let size = 375.0;
    assert_eq!(index_from_offset(0.0, size, 4, false, 4), 0);
    assert_eq!(index_from_offset(-size, size, 4, false, 4), 1);
    assert_eq!(index_from_offset(-3.0 * size, size, 4, false, 4), 3);
    // Positive offsets count from the far end.
    assert_eq!(index_from_offset(size, size, 4, true, 4), 3);
    assert_eq!(index_from_offset(2.0 * size, size, 4, true, 4), 2);
}

#[test]
fn index_wraps_at_the_loop_seam() {
    // -3.7 pages rounds to -4, which is the same slot as 0 in a 4-item loop.
    assert_eq!(index_from_offset(-370.0, 100.0, 4, true, 4), 0);
    assert_eq!(index_from_offset(-400.0, 100.0, 4, true, 4), 0);
    assert_eq!(index_from_offset(-430.0, 100.0, 4, true, 4), 0);
}

#[test]
fn index_handles_empty_dataset() {
    assert_eq!(index_from_offset(-500.0, 100.0, 0, true, 0), 0);
    assert_eq!(index_from_offset(-500.0, 100.0, 0, false, 0), 0);
}

#[test]
fn padded_single_item_always_folds_to_zero() {
    let size = 100.0;
    for page in 0..7 {
        let offset = -(page as f64) * size;
        // A single-item loop is padded to 3 render slots.
        assert_eq!(index_from_offset(offset, size, 3, true, 1), 0);
    }
}

#[test]
fn padded_double_item_folds_to_parity() {
    let size = 100.0;
    for page in 0..8 {
        let offset = -(page as f64) * size;
        // A two-item loop is padded to 4 render slots.
        assert_eq!(index_from_offset(offset, size, 4, true, 2), page % 2);
    }
}

#[test]
fn fold_is_identity_outside_the_degenerate_lengths() {
    assert_eq!(fold_padded_index(5, true, 7), 5);
    assert_eq!(fold_padded_index(5, false, 2), 5);
    assert_eq!(fold_padded_index(3, true, 2), 1);
    assert_eq!(fold_padded_index(3, true, 1), 0);
}

// --- length reconciliation -------------------------------------------------

/// Places the carousel at a whole page with the offset sign matching `direction`,
/// applies the length change, and reports the result as a signed page count.
fn length_change_at_index(
    direction: ScrollDirection,
    index: usize,
    size: f64,
    previous: usize,
    current: usize,
) -> f64 {
    let offset = size * index as f64 * direction.signum();
    offset_after_length_change(direction, offset, size, previous, current) / size
}

#[test]
fn shrink_moves_index_one_before_the_removed_slot() {
    // Positive-offset convention, index 1 of 4 -> 3: the wound cycle re-lands on page 2.
    let pages = length_change_at_index(ScrollDirection::Forward, 1, 375.0, 4, 3);
    assert_eq!(pages, -2.0);
}

#[test]
fn shrink_keeps_index_when_it_still_exists() {
    let pages = length_change_at_index(ScrollDirection::Forward, 2, 375.0, 4, 3);
    assert_eq!(pages, 1.0);
}

#[test]
fn growth_keeps_index_with_negative_offsets() {
    let pages = length_change_at_index(ScrollDirection::Backward, 3, 375.0, 4, 5);
    assert_eq!(pages, -3.0);
}

#[test]
fn growth_keeps_index_with_positive_offsets() {
    let pages = length_change_at_index(ScrollDirection::Forward, 3, 375.0, 4, 5);
    assert_eq!(pages, 4.0);
}

#[test]
fn zero_previous_length_is_guarded() {
    let pages = length_change_at_index(ScrollDirection::Backward, 0, 375.0, 0, 3);
    assert_eq!(pages, 0.0);
}

#[test]
fn shrink_past_the_edge_snaps_to_the_last_slot() {
    let next = offset_after_length_change(ScrollDirection::Backward, 400.0, 100.0, 5, 2);
    assert_eq!(next, -100.0);
}

#[test]
fn reconciliation_matches_the_cycle_model_at_page_positions() {
    // At exact page positions the algorithm reduces to a closed form; sweep it.
    let mut rng = Lcg::new(11);
    let size = 100.0;
    for _ in 0..2000 {
        let previous = rng.gen_range_usize(1, 10);
        let current = rng.gen_range_usize(1, 10);

        // Negative offsets (direction from offset sign: Backward).
        let k = rng.gen_range_usize(0, previous);
        let got =
            offset_after_length_change(ScrollDirection::Backward, -(k as f64) * size, size, previous, current);
        let want = if k <= current.saturating_sub(1) {
            -(k as f64) * size
        } else {
            -((current as f64 - 1.0) * size)
        };
        assert_eq!(got, want, "k={k} previous={previous} current={current}");

        // Positive offsets (Forward): the cycle is shifted by one item and always
        // counts one completed round.
        let k = rng.gen_range_usize(1, previous + 1);
        let got =
            offset_after_length_change(ScrollDirection::Forward, k as f64 * size, size, previous, current);
        let prev_index = previous - k;
        let want = if prev_index as f64 > current as f64 - 1.0 && current < previous {
            -((current as f64 - 1.0) * size)
        } else {
            (k as f64 + current as f64 - previous as f64) * size
        };
        assert_eq!(got, want, "k={k} previous={previous} current={current}");
    }
}

#[test]
fn reconciliation_truncates_toward_zero_for_fractional_positions() {
    // A positive offset below one item size puts the intermediate position index at
    // -0.75; flooring it would count a phantom cycle, truncation must not.
    let next = offset_after_length_change(ScrollDirection::Forward, 25.0, 100.0, 4, 6);
    // round = trunc(-0.75 / 4) + 1 = 1, so the offset gains two items of travel.
    assert_eq!(next, 25.0 + 2.0 * 100.0);
}

// --- size reconciliation ---------------------------------------------------

#[test]
fn size_change_from_unmeasured_is_identity() {
    let mut rng = Lcg::new(3);
    for _ in 0..200 {
        let offset = rng.gen_offset(-5000, 5000);
        assert_eq!(offset_after_size_change(offset, 0.0, 400.0), offset);
    }
}

#[test]
fn size_change_preserves_the_logical_index() {
    for (previous, size) in [
        (500.0, 500.0),
        (500.0, 400.0),
        (500.0, 499.0),
        (500.0, 501.0),
        (224.0, 524.0),
    ] {
        for index in 0..5 {
            let offset = index as f64 * previous;
            let next = offset_after_size_change(offset, previous, size);
            assert_eq!(next / size, index as f64);
        }
    }
}

// --- engine ----------------------------------------------------------------

#[test]
fn engine_starts_at_the_initial_index() {
    let c = Carousel::new(CarouselOptions::new(5, 300.0).with_initial_index(2));
    assert_eq!(c.offset(), -600.0);
    assert_eq!(c.index(), 2);
    assert_eq!(c.previous_index(), 2);
}

#[test]
fn explicit_initial_offset_wins_over_initial_index() {
    let c = Carousel::new(
        CarouselOptions::new(5, 300.0)
            .with_initial_index(2)
            .with_initial_offset(Some(-900.0)),
    );
    assert_eq!(c.offset(), -900.0);
    assert_eq!(c.index(), 3);
}

#[test]
fn pan_round_trip_updates_offset_and_index() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0));
    c.begin_pan();
    assert!(c.is_panning());
    assert_eq!(c.pan_start_offset(), Some(0.0));

    c.update_pan(-160.0);
    assert_eq!(c.offset(), -160.0);
    assert_eq!(c.index(), 2); // -1.6 pages rounds to page 2

    let frozen = c.end_pan();
    assert_eq!(frozen, -160.0);
    assert!(!c.is_panning());
}

#[test]
fn pan_update_without_begin_is_ignored() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0));
    c.update_pan(-160.0);
    assert_eq!(c.offset(), 0.0);
}

#[test]
fn pan_rubber_bands_once_past_the_boundary() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0));
    c.begin_pan();
    // First frame starts inside bounds, so the raw offset passes through...
    c.update_pan(120.0);
    assert_eq!(c.offset(), 120.0);
    // ...and the next frame sees an overscrolled current offset and damps.
    c.update_pan(140.0);
    assert_eq!(c.offset(), 70.0);
}

#[test]
fn pan_hard_clamps_without_overscroll() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0).with_overscroll_enabled(false));
    c.begin_pan();
    c.update_pan(120.0);
    assert_eq!(c.offset(), 0.0);
    c.update_pan(-900.0);
    assert_eq!(c.offset(), -300.0);
}

#[test]
fn index_change_fires_exactly_once_per_transition() {
    let transitions = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&transitions);
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0).with_on_index_change(Some(
        move |change: IndexChange| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert_ne!(change.index, change.previous_index);
        },
    )));

    c.begin_pan();
    // Many frames, one boundary crossing.
    for t in [-10.0, -20.0, -30.0, -40.0, -60.0, -80.0] {
        c.update_pan(t);
    }
    c.end_pan();

    assert_eq!(transitions.load(Ordering::SeqCst), 1);
    assert_eq!(c.index(), 1);
    assert_eq!(c.previous_index(), 0);
}

#[test]
fn batch_update_coalesces_change_notifications() {
    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&notifications);
    let mut c = Carousel::new(
        CarouselOptions::new(4, 100.0)
            .with_on_change(Some(move |_: &Carousel, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
    );

    c.batch_update(|c| {
        c.begin_pan();
        c.update_pan(-50.0);
        c.update_pan(-150.0);
        c.end_pan();
    });

    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(c.offset(), -150.0);
}

#[test]
fn set_item_size_preserves_the_index() {
    let mut c = Carousel::new(CarouselOptions::new(5, 500.0).with_initial_index(3));
    assert_eq!(c.index(), 3);
    c.set_item_size(320.0);
    assert_eq!(c.offset(), -960.0);
    assert_eq!(c.index(), 3);
}

#[test]
fn set_item_size_from_unmeasured_keeps_the_offset() {
    let mut c = Carousel::new(
        CarouselOptions::new(5, 0.0).with_initial_offset(Some(-260.0)),
    );
    c.set_item_size(100.0);
    assert_eq!(c.offset(), -260.0);
    assert_eq!(c.index(), 3); // derived once a real size exists: -2.6 pages rounds to 3
}

#[test]
fn set_count_keeps_the_visible_item_in_loop_mode() {
    let mut c = Carousel::new(
        CarouselOptions::new(4, 375.0)
            .with_looping(true)
            .with_initial_index(2),
    );
    c.set_count(3);
    // Index 2 still exists in the shrunk set; the offset is left alone.
    assert_eq!(c.offset() / 375.0, -2.0);
    assert_eq!(c.index(), 2);
}

#[test]
fn set_count_rewinds_completed_cycles_in_loop_mode() {
    // One full winding past index 1 (page 5 of a 4-item loop).
    let mut c = Carousel::new(
        CarouselOptions::new(4, 375.0)
            .with_looping(true)
            .with_initial_offset(Some(-5.0 * 375.0)),
    );
    assert_eq!(c.index(), 1);
    c.set_count(3);
    // The completed cycle shrinks by one item, so the winding loses one page.
    assert_eq!(c.offset() / 375.0, -4.0);
    assert_eq!(c.index(), 1);
}

#[test]
fn set_count_shrink_past_edge_stays_in_bounded_range() {
    let mut c = Carousel::new(CarouselOptions::new(5, 100.0).with_initial_index(4));
    c.set_count(2);
    assert_eq!(c.offset(), -100.0);
    assert_eq!(c.index(), 1);
    assert!(c.offset() >= -c.travel_limit());
}

#[test]
fn scroll_to_index_preserves_loop_winding() {
    let mut c = Carousel::new(
        CarouselOptions::new(4, 100.0)
            .with_looping(true)
            .with_initial_offset(Some(-900.0)), // page 9, two full windings past index 1
    );
    assert_eq!(c.index(), 1);
    c.scroll_to_index(2);
    assert_eq!(c.offset(), -1000.0); // one page further, not rewound to -200
    assert_eq!(c.index(), 2);
    assert_eq!(c.current_page(), 10);
}

#[test]
fn next_and_prev_step_whole_pages() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0));
    c.next();
    assert_eq!(c.offset(), -100.0);
    c.next();
    assert_eq!(c.offset(), -200.0);
    c.prev();
    assert_eq!(c.offset(), -100.0);
    assert_eq!(c.index(), 1);
}

#[test]
fn next_stops_at_the_last_page_when_bounded() {
    let mut c = Carousel::new(CarouselOptions::new(3, 100.0).with_initial_index(2));
    c.next();
    assert_eq!(c.offset(), -200.0);
    assert_eq!(c.index(), 2);
}

#[test]
fn prev_stops_at_the_first_page_when_bounded() {
    let mut c = Carousel::new(CarouselOptions::new(3, 100.0));
    c.prev();
    assert_eq!(c.offset(), 0.0);
}

#[test]
fn next_wraps_forever_in_loop_mode() {
    let mut c = Carousel::new(CarouselOptions::new(3, 100.0).with_looping(true));
    for _ in 0..7 {
        c.next();
    }
    assert_eq!(c.offset(), -700.0);
    assert_eq!(c.index(), 1); // 7 mod 3
}

#[test]
fn frame_state_round_trips() {
    let mut c = Carousel::new(
        CarouselOptions::new(6, 240.0)
            .with_looping(true)
            .with_initial_index(4),
    );
    let frame = c.frame_state();

    c.begin_pan();
    c.update_pan(-1000.0);
    c.set_item_size(300.0);

    c.restore_frame_state(frame);
    assert_eq!(c.offset(), -960.0);
    assert_eq!(c.item_size(), 240.0);
    assert_eq!(c.index(), 4);
    assert!(!c.is_panning());
}

#[test]
fn disabled_carousel_ignores_events() {
    let mut c = Carousel::new(CarouselOptions::new(4, 100.0).with_enabled(false));
    c.begin_pan();
    c.update_pan(-250.0);
    c.set_offset(-300.0);
    assert_eq!(c.offset(), 0.0);
    assert_eq!(c.index(), 0);
    assert!(!c.is_panning());

    c.set_enabled(true);
    c.set_offset(-300.0);
    assert_eq!(c.index(), 3);
}

#[test]
fn index_stays_in_sync_under_random_driving() {
    let mut rng = Lcg::new(99);
    let mut c = Carousel::new(CarouselOptions::new(6, 120.0).with_looping(true));
    for _ in 0..500 {
        match rng.gen_range_usize(0, 4) {
            0 => {
                c.begin_pan();
                c.update_pan(rng.gen_offset(-600, 600));
                c.end_pan();
            }
            1 => {
                c.set_offset(rng.gen_offset(-4000, 4000));
            }
            2 => {
                c.next();
            }
            _ => {
                c.prev();
            }
        }
        let expected = math::index_from_offset(
            c.offset(),
            c.item_size(),
            c.count(),
            c.looping(),
            c.original_count(),
        );
        assert_eq!(c.index(), expected);
    }
}
