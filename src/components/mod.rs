pub mod general;
pub mod poll;

pub use general::*;
pub use poll::*;
