//! In-memory blog store - used when no database is configured, and as a test fixture.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{
    Author, Comment, Like, Post, PostWithRelated, Tag, TagWithPostCount,
};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, TagRepository};

use super::batch::{RelatedRows, annotate_comment_counts};

/// Fields of a post before it gets an id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
    pub image: Option<String>,
}

impl NewPost {
    pub fn new(
        author_id: i32,
        title: impl Into<String>,
        slug: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            text: String::new(),
            slug: slug.into(),
            published_at,
            image: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Default)]
struct BlogData {
    authors: Vec<Author>,
    posts: Vec<Post>,
    tags: Vec<Tag>,
    /// `(post_id, tag_id)` in the order tags were attached.
    links: Vec<(i32, i32)>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

impl BlogData {
    fn likes_for(&self, post_id: i32) -> u64 {
        self.likes.iter().filter(|l| l.post_id == post_id).count() as u64
    }

    fn posts_for_tag(&self, tag_id: i32) -> u64 {
        self.links.iter().filter(|(_, t)| *t == tag_id).count() as u64
    }

    fn tag_with_count(&self, tag: &Tag) -> TagWithPostCount {
        TagWithPostCount {
            tag: tag.clone(),
            posts_count: self.posts_for_tag(tag.id),
        }
    }

    fn require_author(&self, id: i32) -> Result<(), RepoError> {
        require(self.authors.iter().any(|a| a.id == id), "author", id)
    }

    fn require_post(&self, id: i32) -> Result<(), RepoError> {
        require(self.posts.iter().any(|p| p.id == id), "post", id)
    }

    fn require_tag(&self, id: i32) -> Result<(), RepoError> {
        require(self.tags.iter().any(|t| t.id == id), "tag", id)
    }
}

/// Blog data held in process memory behind an async `RwLock`.
///
/// Follows the same ordering rules as the PostgreSQL repositories, and the insert
/// helpers enforce the schema's unique keys and foreign keys.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryBlogStore {
    data: RwLock<BlogData>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_author(&self, username: impl Into<String>) -> Result<Author, RepoError> {
        let username = username.into();
        let mut data = self.data.write().await;
        if data.authors.iter().any(|a| a.username == username) {
            return Err(duplicate("author", username));
        }

        let author = Author {
            id: next_id(data.authors.iter().map(|a| a.id)),
            username,
        };
        data.authors.push(author.clone());
        Ok(author)
    }

    pub async fn add_post(&self, new: NewPost) -> Result<Post, RepoError> {
        let mut data = self.data.write().await;
        data.require_author(new.author_id)?;
        if data.posts.iter().any(|p| p.slug == new.slug) {
            return Err(duplicate("post", new.slug));
        }

        let post = Post {
            id: next_id(data.posts.iter().map(|p| p.id)),
            author_id: new.author_id,
            title: new.title,
            text: new.text,
            slug: new.slug,
            published_at: new.published_at,
            image: new.image,
        };
        data.posts.push(post.clone());
        Ok(post)
    }

    pub async fn add_tag(&self, title: impl Into<String>) -> Result<Tag, RepoError> {
        let title = title.into();
        let mut data = self.data.write().await;
        if data.tags.iter().any(|t| t.title == title) {
            return Err(duplicate("tag", title));
        }

        let tag = Tag {
            id: next_id(data.tags.iter().map(|t| t.id)),
            title,
        };
        data.tags.push(tag.clone());
        Ok(tag)
    }

    /// Attach a tag to a post. Attaching twice is a no-op.
    pub async fn tag_post(&self, post_id: i32, tag_id: i32) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.require_post(post_id)?;
        data.require_tag(tag_id)?;

        if !data.links.contains(&(post_id, tag_id)) {
            data.links.push((post_id, tag_id));
        }
        Ok(())
    }

    pub async fn add_comment(
        &self,
        post_id: i32,
        author_id: i32,
        text: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Result<Comment, RepoError> {
        let mut data = self.data.write().await;
        data.require_post(post_id)?;
        data.require_author(author_id)?;

        let comment = Comment {
            id: next_id(data.comments.iter().map(|c| c.id)),
            post_id,
            author_id,
            text: text.into(),
            published_at,
        };
        data.comments.push(comment.clone());
        Ok(comment)
    }

    /// Record a like. Liking twice is a no-op.
    pub async fn like(&self, post_id: i32, author_id: i32) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.require_post(post_id)?;
        data.require_author(author_id)?;

        let like = Like { post_id, author_id };
        if !data.likes.contains(&like) {
            data.likes.push(like);
        }
        Ok(())
    }
}

fn require(exists: bool, entity_type: &'static str, id: i32) -> Result<(), RepoError> {
    if exists {
        Ok(())
    } else {
        Err(RepoError::MissingRelation { entity_type, id })
    }
}

fn duplicate(entity_type: &'static str, key: String) -> RepoError {
    RepoError::Duplicate { entity_type, key }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

fn limited<T>(items: impl Iterator<Item = T>, limit: Option<u64>) -> Vec<T> {
    match limit {
        Some(n) => items.take(usize::try_from(n).unwrap_or(usize::MAX)).collect(),
        None => items.collect(),
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn popular_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;

        let mut ranked: Vec<(u64, &Post)> = data
            .posts
            .iter()
            .map(|p| (data.likes_for(p.id), p))
            .collect();
        ranked.sort_by(|(a_likes, a), (b_likes, b)| {
            b_likes.cmp(a_likes).then_with(|| a.id.cmp(&b.id))
        });

        Ok(limited(ranked.into_iter().map(|(_, p)| p.clone()), limit))
    }

    async fn latest_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;

        let mut posts = data.posts.clone();
        newest_first(&mut posts);

        Ok(limited(posts.into_iter(), limit))
    }

    async fn posts_with_tag(
        &self,
        tag_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;

        let mut posts: Vec<Post> = data
            .posts
            .iter()
            .filter(|p| data.links.contains(&(p.id, tag_id)))
            .cloned()
            .collect();
        newest_first(&mut posts);

        Ok(limited(posts.into_iter(), limit))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn count_likes(&self, post_id: i32) -> Result<u64, RepoError> {
        let data = self.data.read().await;
        Ok(data.likes_for(post_id))
    }

    async fn with_related(&self, posts: Vec<Post>) -> Result<Vec<PostWithRelated>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let data = self.data.read().await;
        let in_batch = |post_id: i32| posts.iter().any(|p| p.id == post_id);

        let mut comments: Vec<Comment> = data
            .comments
            .iter()
            .filter(|c| in_batch(c.post_id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let author_ids = RelatedRows::author_ids(&posts, &comments);
        let authors: HashMap<i32, Author> = data
            .authors
            .iter()
            .filter(|a| author_ids.contains(&a.id))
            .map(|a| (a.id, a.clone()))
            .collect();

        let links: Vec<(i32, i32)> = data
            .links
            .iter()
            .filter(|(post_id, _)| in_batch(*post_id))
            .copied()
            .collect();

        let tags: HashMap<i32, TagWithPostCount> = data
            .tags
            .iter()
            .filter(|t| links.iter().any(|(_, tag_id)| *tag_id == t.id))
            .map(|t| (t.id, data.tag_with_count(t)))
            .collect();

        drop(data);

        RelatedRows {
            authors,
            comments,
            links,
            tags,
        }
        .assemble(posts)
    }

    async fn fetch_with_comments_count(
        &self,
        posts: Vec<PostWithRelated>,
    ) -> Result<Vec<PostWithRelated>, RepoError> {
        if posts.is_empty() {
            return Ok(posts);
        }

        let data = self.data.read().await;
        let mut counts: HashMap<i32, u64> = HashMap::new();
        for comment in &data.comments {
            if posts.iter().any(|p| p.post.id == comment.post_id) {
                *counts.entry(comment.post_id).or_default() += 1;
            }
        }
        drop(data);

        Ok(annotate_comment_counts(posts, &counts))
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn popular_tags(&self, limit: Option<u64>) -> Result<Vec<TagWithPostCount>, RepoError> {
        let data = self.data.read().await;

        let mut ranked: Vec<TagWithPostCount> =
            data.tags.iter().map(|t| data.tag_with_count(t)).collect();
        ranked.sort_by(|a, b| {
            b.posts_count
                .cmp(&a.posts_count)
                .then_with(|| a.tag.id.cmp(&b.tag.id))
        });

        Ok(limited(ranked.into_iter(), limit))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError> {
        let data = self.data.read().await;
        Ok(data.tags.iter().find(|t| t.title == title).cloned())
    }
}
