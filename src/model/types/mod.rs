pub mod ballot;
pub mod error;
pub mod id;
pub mod poll;
pub mod user;

pub use ballot::*;
pub use error::*;
pub use id::*;
pub use poll::*;
pub use user::*;

#[cfg(feature = "ssr")]
pub mod app_state;
#[cfg(feature = "ssr")]
pub mod db;
#[cfg(feature = "ssr")]
pub use app_state::*;
#[cfg(feature = "ssr")]
pub use db::*;
