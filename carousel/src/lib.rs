//! A headless carousel engine.
//!
//! For adapter-level utilities (tween scrolling, release snapping), see the
//! `carousel-adapter` crate.
//!
//! This crate focuses on the circular scroll-position arithmetic a swipeable
//! carousel/pager needs: translating pan-gesture deltas into a clamped or
//! rubber-banded offset, deriving the logical item index from that offset (with
//! loop wrap-around), and reconciling the offset when the dataset length or the
//! item size changes mid-flight.
//!
//! It is UI-agnostic. A GUI/TUI layer is expected to provide:
//! - pan gesture begin/update/end events (cumulative translation per frame)
//! - item size (width or height, per orientation) and dataset length
//! - an animation layer that settles released offsets and commits them back
//!
//! One [`Carousel`] instance owns exactly one offset and expects one logical
//! writer: run all calls from the same frame-synchronous callback and never
//! interleave a reconciliation with an in-flight pan update.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod carousel;
pub mod math;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use carousel::Carousel;
pub use options::{CarouselOptions, OnChangeCallback, OnIndexChangeCallback};
pub use state::{FrameState, LayoutState, ScrollState};
pub use types::{IndexChange, ScrollDirection};
