//! Ports (trait boundaries) between the learning core and its drivers.

pub mod learner;
pub mod observer;

pub use learner::{Learner, Step};
pub use observer::Observer;
