//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use blog_core::domain::{Author, Comment, Post, PostWithRelated, Tag, TagWithPostCount};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, TagRepository};

use super::batch::{RelatedRows, annotate_comment_counts};
use super::entity::{author, comment, post, post_like, post_tag, tag};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

/// PostgreSQL tag repository.
pub struct PostgresTagRepository {
    db: Arc<DbConn>,
}

impl PostgresTagRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct TagCountRow {
    id: i32,
    title: String,
    posts_count: i64,
}

impl From<TagCountRow> for TagWithPostCount {
    fn from(row: TagCountRow) -> Self {
        Self {
            tag: Tag {
                id: row.id,
                title: row.title,
            },
            posts_count: to_count(row.posts_count),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CommentCountRow {
    post_id: i32,
    comments_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct LikesCountRow {
    likes_count: i64,
}

fn repo_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn posts_count_expr() -> SimpleExpr {
    Expr::col((post_tag::Entity, post_tag::Column::PostId)).count()
}

/// Tags joined to their links and grouped, selecting `id`, `title` and `posts_count`.
fn tags_with_post_count() -> Select<tag::Entity> {
    tag::Entity::find()
        .select_only()
        .column(tag::Column::Id)
        .column(tag::Column::Title)
        .column_as(posts_count_expr(), "posts_count")
        .left_join(post_tag::Entity)
        .group_by(tag::Column::Id)
        .group_by(tag::Column::Title)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn popular_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .left_join(post_like::Entity)
            .group_by(post::Column::Id)
            .order_by_desc(Expr::col((post_like::Entity, post_like::Column::Id)).count())
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn latest_posts(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn posts_with_tag(
        &self,
        tag_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .inner_join(post_tag::Entity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(%slug, "Finding post by slug");

        let result = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_likes(&self, post_id: i32) -> Result<u64, RepoError> {
        let row = post_like::Entity::find()
            .select_only()
            .column_as(
                Expr::col((post_like::Entity, post_like::Column::Id)).count(),
                "likes_count",
            )
            .filter(post_like::Column::PostId.eq(post_id))
            .into_model::<LikesCountRow>()
            .one(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(row.map(|r| to_count(r.likes_count)).unwrap_or(0))
    }

    async fn with_related(&self, posts: Vec<Post>) -> Result<Vec<PostWithRelated>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
        tracing::debug!(posts = post_ids.len(), "Loading related objects");

        let comments: Vec<Comment> = comment::Entity::find()
            .filter(comment::Column::PostId.is_in(post_ids.clone()))
            .order_by_asc(comment::Column::PublishedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(Into::into)
            .collect();

        let authors: HashMap<i32, Author> = author::Entity::find()
            .filter(author::Column::Id.is_in(RelatedRows::author_ids(&posts, &comments)))
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let links: Vec<(i32, i32)> = post_tag::Entity::find()
            .filter(post_tag::Column::PostId.is_in(post_ids))
            .order_by_asc(post_tag::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(|link| (link.post_id, link.tag_id))
            .collect();

        let tags: HashMap<i32, TagWithPostCount> = if links.is_empty() {
            HashMap::new()
        } else {
            let mut tag_ids: Vec<i32> = links.iter().map(|(_, tag_id)| *tag_id).collect();
            tag_ids.sort_unstable();
            tag_ids.dedup();

            tags_with_post_count()
                .filter(tag::Column::Id.is_in(tag_ids))
                .into_model::<TagCountRow>()
                .all(self.db.as_ref())
                .await
                .map_err(repo_err)?
                .into_iter()
                .map(|row| (row.id, row.into()))
                .collect()
        };

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

        let post_ids: Vec<i32> = posts.iter().map(|p| p.post.id).collect();

        let counts: HashMap<i32, u64> = comment::Entity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(
                Expr::col((comment::Entity, comment::Column::Id)).count(),
                "comments_count",
            )
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_model::<CommentCountRow>()
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(|row| (row.post_id, to_count(row.comments_count)))
            .collect();

        Ok(annotate_comment_counts(posts, &counts))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn popular_tags(&self, limit: Option<u64>) -> Result<Vec<TagWithPostCount>, RepoError> {
        let rows = tags_with_post_count()
            .order_by_desc(posts_count_expr())
            .order_by_asc(tag::Column::Id)
            .limit(limit)
            .into_model::<TagCountRow>()
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError> {
        tracing::debug!(%title, "Finding tag by title");

        let result = tag::Entity::find()
            .filter(tag::Column::Title.eq(title))
            .one(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}
