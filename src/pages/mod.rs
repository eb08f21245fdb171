pub mod home_page;
pub mod not_found;
pub mod poll_page;
pub mod polls_page;

pub use home_page::*;
pub use not_found::*;
pub use poll_page::*;
pub use polls_page::*;
