//! The pure arithmetic core.
//!
//! Everything in this module is a total function over finite inputs: no state, no
//! allocation, no side effects. The [`crate::Carousel`] engine owns the accumulated
//! offset and replaces it with the return values of these functions; nothing else
//! ever writes it.
//!
//! Sign convention: offset `0.0` is the first item, advancing forward makes the
//! offset more negative. Bounded travel therefore lives in `[-travel_limit, 0]`.

use crate::ScrollDirection;

/// Returns `value` unless `divisor` is zero, in which case the whole quotient (or
/// remainder) is treated as zero instead of producing a NaN/infinity.
fn zero_guard(divisor: f64, value: f64) -> f64 {
    if divisor == 0.0 { 0.0 } else { value }
}

/// Maximum offset magnitude in bounded (non-looping) mode: `(count - 1) * item_size`.
///
/// Saturates to `0.0` for an empty dataset, collapsing the travel range to a point.
pub fn travel_limit(count: usize, item_size: f64) -> f64 {
    count.saturating_sub(1) as f64 * item_size
}

/// Computes the next accumulated offset for an in-flight pan gesture.
///
/// - `current_offset` is the offset from the previous frame (before this frame's
///   cumulative `pan_translation` is applied).
/// - `pan_start_offset` is the offset captured at gesture-begin.
/// - `pan_translation` is the cumulative translation reported by the gesture
///   recognizer since gesture-begin.
///
/// In loop mode the raw offset passes through unbounded; wrap-around is the index
/// derivation's job, not this function's. In bounded mode the offset is either hard
/// clamped into `[-travel_limit, 0]` (overscroll disabled) or damped to half the
/// translation once the previous frame already sat past a boundary (rubber-banding).
pub fn clamp_pan_translation(
    looping: bool,
    overscroll_enabled: bool,
    current_offset: f64,
    pan_start_offset: f64,
    pan_translation: f64,
    travel_limit: f64,
) -> f64 {
    let raw = pan_start_offset + pan_translation;

    if looping {
        return raw;
    }

    if !overscroll_enabled {
        return raw.max(-travel_limit).min(0.0);
    }

    if current_offset > 0.0 || current_offset < -travel_limit {
        let boundary = if current_offset > 0.0 { 0.0 } else { -travel_limit };
        let fixed = boundary - pan_start_offset;
        let dynamic = pan_translation - fixed;
        return boundary + dynamic * 0.5;
    }

    raw
}

/// Derives the logical item index from an accumulated offset.
///
/// `count` is the dataset length after any loop-padding the rendering layer applied;
/// `original_count` is the length before padding and only participates in the
/// 1/2-item fold (see [`fold_padded_index`]).
///
/// Requires `item_size > 0`; calling with a zero size is a contract violation, not a
/// recoverable condition. The result is deterministic: identical inputs always yield
/// the identical index.
pub fn index_from_offset(
    offset: f64,
    item_size: f64,
    count: usize,
    looping: bool,
    original_count: usize,
) -> usize {
    if count == 0 {
        return 0;
    }

    let len = count as f64;
    let raw = ((offset / item_size) % len).round();
    let candidate = if offset <= 0.0 {
        raw.abs()
    } else if raw > 0.0 {
        (len - raw).abs()
    } else {
        0.0
    };

    // `candidate` can round up to `len` just before the wrap point; fold it back.
    let index = (candidate as usize) % count;
    fold_padded_index(index, looping, original_count)
}

/// Folds a padded loop index back onto the small set of distinct logical items.
///
/// A looping carousel with one or two items duplicates them so there is always
/// somewhere to scroll to; the duplicated slots all map back to the original item.
pub fn fold_padded_index(index: usize, looping: bool, original_count: usize) -> usize {
    if looping {
        match original_count {
            1 => return 0,
            2 => return index % 2,
            _ => {}
        }
    }
    index
}

/// Recomputes an equivalent offset after the dataset length changed, so the item
/// currently under the viewport stays there.
///
/// The offset is expressed in (possibly loop-wound) item units, so a plain rescale is
/// not enough: the number of completed cycles (`round`) determines how much phantom
/// travel the length delta adds or removes. When the dataset shrank past the slot the
/// viewport was on, the offset snaps to the last remaining slot instead.
///
/// `round` truncates toward zero rather than flooring; the two differ for the
/// negative intermediate positions the backward branch produces, and truncation is
/// what keeps the index stable across a change.
pub fn offset_after_length_change(
    direction: ScrollDirection,
    offset: f64,
    item_size: f64,
    previous_count: usize,
    count: usize,
) -> f64 {
    let dir = direction.signum();
    let negative_offset = dir < 0.0;
    let previous_len = previous_count as f64;
    let current_len = count as f64;

    let position_index = if negative_offset {
        offset.abs() / item_size
    } else {
        (offset.abs() - item_size) / item_size
    };

    let mut round = zero_guard(previous_len, position_index / previous_len).trunc();
    if !negative_offset {
        round += 1.0;
    }

    let cycle_offset = zero_guard(previous_len, position_index % previous_len);
    let prev_index = if negative_offset {
        cycle_offset
    } else {
        previous_len - cycle_offset - 1.0
    };

    let changed_length = round * (current_len - previous_len);
    let changed_offset = changed_length * item_size;

    if prev_index > current_len - 1.0 && count < previous_count {
        // The slot under the viewport no longer exists; snap to the last valid one.
        let last = (current_len - 1.0) * item_size;
        if negative_offset { last * dir } else { -last }
    } else {
        offset + changed_offset * dir
    }
}

/// Rescales an offset proportionally after the item size changed, preserving the
/// logical index (`index ~ offset / size` is held invariant).
///
/// A zero `previous_size` is the "not yet measured" sentinel and passes the offset
/// through unchanged.
pub fn offset_after_size_change(offset: f64, previous_size: f64, size: f64) -> f64 {
    if previous_size == 0.0 {
        return offset;
    }
    (offset / previous_size) * size
}
