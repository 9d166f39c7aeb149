mod event;
mod feed;
mod post;
mod principal;
mod user;

pub use event::*;
pub use feed::*;
pub use post::*;
pub use principal::*;
pub use user::*;
