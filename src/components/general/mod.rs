pub mod icon;
pub mod loading;
pub mod modal;
pub mod share;
pub mod user;

#[allow(unused_imports)]
pub use icon::*;
#[allow(unused_imports)]
pub use loading::*;
#[allow(unused_imports)]
pub use modal::*;
#[allow(unused_imports)]
pub use share::*;
#[allow(unused_imports)]
pub use user::*;
