//! Shared simulation primitives
//!
//! Everything here is pure and deterministic:
//! - Injected logical time only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod rect;
pub mod schedule;

pub use collision::{crowds_any, overlaps_any, within_radius};
pub use placement::Placement;
pub use rect::Rect;
pub use schedule::{Deadline, IntervalTicker, LogicalClock, MAX_CATCH_UP_TICKS};
