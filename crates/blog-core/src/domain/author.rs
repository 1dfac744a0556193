use serde::{Deserialize, Serialize};

/// Author entity - writes posts and comments, likes posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub username: String,
}

/// One author liking one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub post_id: i32,
    pub author_id: i32,
}
