pub mod aggregate;
pub mod coordinator;
pub mod date_option;
pub mod dialog;
pub mod draft;
pub mod editor;
pub mod page;
pub mod types;

pub use aggregate::*;
pub use coordinator::*;
pub use date_option::*;
pub use dialog::*;
pub use draft::*;
pub use editor::*;
pub use page::*;
pub use types::*;

#[cfg(feature = "ssr")]
pub mod functions;
#[cfg(feature = "ssr")]
pub use functions::*;
