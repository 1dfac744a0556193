//! Domain entities - the core business objects.

mod author;
mod comment;
mod post;
mod tag;

pub use author::{Author, Like};
pub use comment::{Comment, CommentWithAuthor};
pub use post::{Post, PostWithRelated, TEASER_LENGTH};
pub use tag::{Tag, TagWithPostCount};
