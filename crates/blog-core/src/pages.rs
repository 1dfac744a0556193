//! Page composition - the four pages of the blog built from the ports and the serializer.

use std::sync::Arc;

use blog_shared::views::{
    ContactsContext, HomeContext, PostDetailContext, PostSummaryView, TagFilterContext, TagView,
};

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{MediaStorage, PostRepository, TagRepository};
use crate::serializer::{serialize_post, serialize_post_detail, serialize_tag};

/// Size of the popular posts and popular tags blocks.
pub const SIDEBAR_SIZE: u64 = 5;
/// Number of newest posts on the home page.
pub const HOME_PAGE_SIZE: u64 = 5;
/// Maximum number of posts listed on a tag page.
pub const TAG_PAGE_SIZE: u64 = 20;

/// Builds page contexts. Cheap to clone.
#[derive(Clone)]
pub struct BlogPages {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    media: Arc<dyn MediaStorage>,
}

impl BlogPages {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self { posts, tags, media }
    }

    /// Popular posts, newest posts and popular tags.
    pub async fn home(&self) -> Result<HomeContext, DomainError> {
        let most_popular_posts = self.popular_posts().await?;

        let latest = self.posts.latest_posts(Some(HOME_PAGE_SIZE)).await?;
        let page_posts = self.summaries(latest).await?;

        let popular_tags = self.popular_tags().await?;

        Ok(HomeContext {
            most_popular_posts,
            page_posts,
            popular_tags,
        })
    }

    /// A single post with its comments, tags and like count, plus the sidebar.
    pub async fn post_detail(&self, slug: &str) -> Result<PostDetailContext, DomainError> {
        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post", slug))?;

        let likes_count = self.posts.count_likes(post.id).await?;

        let loaded = self
            .posts
            .with_related(vec![post])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("post", slug))?;

        let post = serialize_post_detail(&loaded, likes_count, self.media.as_ref());

        Ok(PostDetailContext {
            post,
            popular_tags: self.popular_tags().await?,
            most_popular_posts: self.popular_posts().await?,
        })
    }

    /// Newest posts carrying the tag, plus the sidebar.
    pub async fn tag_filter(&self, tag_title: &str) -> Result<TagFilterContext, DomainError> {
        let tag = self
            .tags
            .find_by_title(tag_title)
            .await?
            .ok_or_else(|| DomainError::not_found("tag", tag_title))?;

        let popular_tags = self.popular_tags().await?;
        let most_popular_posts = self.popular_posts().await?;

        let related = self.posts.posts_with_tag(tag.id, Some(TAG_PAGE_SIZE)).await?;
        let posts = self.summaries(related).await?;

        Ok(TagFilterContext {
            tag: tag.title,
            popular_tags,
            posts,
            most_popular_posts,
        })
    }

    pub fn contacts(&self) -> ContactsContext {
        ContactsContext::default()
    }

    async fn popular_posts(&self) -> Result<Vec<PostSummaryView>, DomainError> {
        let posts = self.posts.popular_posts(Some(SIDEBAR_SIZE)).await?;
        self.summaries(posts).await
    }

    async fn popular_tags(&self) -> Result<Vec<TagView>, DomainError> {
        let tags = self.tags.popular_tags(Some(SIDEBAR_SIZE)).await?;
        Ok(tags.iter().map(serialize_tag).collect())
    }

    /// Load, annotate and serialize a batch of posts for a list view.
    async fn summaries(&self, posts: Vec<Post>) -> Result<Vec<PostSummaryView>, DomainError> {
        let loaded = self.posts.with_related(posts).await?;
        let annotated = self.posts.fetch_with_comments_count(loaded).await?;

        annotated
            .iter()
            .map(|post| serialize_post(post, self.media.as_ref()))
            .collect()
    }
}
