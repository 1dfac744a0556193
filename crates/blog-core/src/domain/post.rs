use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, CommentWithAuthor, TagWithPostCount};

/// Number of characters shown in list views.
pub const TEASER_LENGTH: usize = 200;

/// Post entity - a published blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub text: String,
    /// Unique, stable lookup key used in URLs.
    pub slug: String,
    pub published_at: DateTime<Utc>,
    /// Stored file name, resolved to a URL by the media storage.
    pub image: Option<String>,
}

impl Post {
    /// The first [`TEASER_LENGTH`] characters of the body.
    pub fn teaser(&self) -> String {
        self.text.chars().take(TEASER_LENGTH).collect()
    }
}

/// A post with its author, comments and tags loaded in one batch.
///
/// `comments_count` stays `None` until the batch goes through the comment-count
/// annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithRelated {
    pub post: Post,
    pub author: Author,
    pub comments: Vec<CommentWithAuthor>,
    /// Tags in link order.
    pub tags: Vec<TagWithPostCount>,
    pub comments_count: Option<u64>,
}

impl PostWithRelated {
    pub fn first_tag(&self) -> Option<&TagWithPostCount> {
        self.tags.first()
    }
}
