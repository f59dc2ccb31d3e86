//! Domain entities - the core business objects.

mod page;
pub(crate) mod post;
mod user;

pub use page::{Page, PageRequest};
pub use post::Post;
pub use user::{Role, User};
