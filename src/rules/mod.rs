//! Box mechanics used by the searches on top of the board engine.
//!
//! - [`stuck`]: detect a box that the last push trapped.
//! - [`pull`]: undo such a push when an anchor sits behind the box.
//!
//! Both searches call [`pull_if_stuck`] after every accepted move.

pub mod pull;
pub mod stuck;

pub use pull::{apply_pull, pull_if_stuck};
pub use stuck::{blocked_sides, is_box_stuck, is_near_corner, is_side_blocked};
