//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and focuses on the core math and state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Release snapping (paging / nearest-page settle after a drag)
//! - Tween-based smooth scrolling helpers (optional; adapter-driven)
//!
//! This crate is intentionally framework-agnostic (no winit/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod tween;


pub use controller::Controller;
pub use tween::{Easing, Tween};
