pub mod avatar;
pub mod date_card;
pub mod delete_poll_dialog;
pub mod header;
pub mod manage_access;
pub mod manage_poll;
pub mod mobile_poll;
pub mod time_zone_picker;

#[allow(unused_imports)]
pub use avatar::*;
#[allow(unused_imports)]
pub use date_card::*;
#[allow(unused_imports)]
pub use delete_poll_dialog::*;
#[allow(unused_imports)]
pub use header::*;
#[allow(unused_imports)]
pub use manage_access::*;
#[allow(unused_imports)]
pub use manage_poll::*;
#[allow(unused_imports)]
pub use mobile_poll::*;
#[allow(unused_imports)]
pub use time_zone_picker::*;
