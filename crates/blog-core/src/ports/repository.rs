use async_trait::async_trait;

use crate::domain::{Post, PostWithRelated, Tag, TagWithPostCount};
use crate::error::RepoError;

/// Post queries.
///
/// Every method documents how many queries it issues. None of the bounds depend on
/// the number of rows involved.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts ordered by like count, most liked first, ties by ascending id.
    /// One aggregate query.
    async fn popular_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError>;

    /// Posts ordered by `published_at`, newest first, ties by descending id.
    /// One query.
    async fn latest_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError>;

    /// Posts carrying the tag, newest first. One query.
    async fn posts_with_tag(&self, tag_id: i32, limit: Option<u64>)
    -> Result<Vec<Post>, RepoError>;

    /// The post with this slug. One query.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Number of likes on the post. One aggregate query.
    async fn count_likes(&self, post_id: i32) -> Result<u64, RepoError>;

    /// Load authors, comments (with their authors) and tags (with post counts) for a
    /// batch. Four queries for a non-empty batch, three when no post has tags, none
    /// for an empty batch. Order of the batch is preserved.
    async fn with_related(&self, posts: Vec<Post>) -> Result<Vec<PostWithRelated>, RepoError>;

    /// Set `comments_count` on every post of the batch. One grouped aggregate query,
    /// none for an empty batch. Order of the batch is preserved.
    async fn fetch_with_comments_count(
        &self,
        posts: Vec<PostWithRelated>,
    ) -> Result<Vec<PostWithRelated>, RepoError>;
}

/// Tag queries.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Tags with their post counts, most used first, ties by ascending id.
    /// One aggregate query.
    async fn popular_tags(&self, limit: Option<u64>) -> Result<Vec<TagWithPostCount>, RepoError>;

    /// The tag with this title. One query.
    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError>;
}
