//! Grid snake engine
//!
//! The snake moves one cell per tick on a toroidal grid, grows on fruit, and
//! speeds up and thickens as the score climbs.

pub mod session;
pub mod state;
pub mod tick;
pub mod view;

pub use session::{SnakeCommand, SnakeSession};
pub use state::{Direction, Segment, SnakeEvent, SnakePhase, SnakeState, place_fruit};
pub use tick::{fruit_in_reach, step_wrapped, tick};
pub use view::{SegmentView, SnakeView};
