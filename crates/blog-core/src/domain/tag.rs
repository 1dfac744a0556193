use serde::{Deserialize, Serialize};

/// Tag entity. The title is unique and doubles as the filter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub title: String,
}

/// A tag together with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWithPostCount {
    pub tag: Tag,
    pub posts_count: u64,
}
