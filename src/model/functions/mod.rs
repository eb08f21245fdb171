mod participant;
pub use participant::*;

mod poll;
pub use poll::*;
