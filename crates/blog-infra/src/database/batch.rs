//! Stitching batch query results back onto their posts.

use std::collections::HashMap;

use blog_core::domain::{
    Author, Comment, CommentWithAuthor, Post, PostWithRelated, TagWithPostCount,
};
use blog_core::error::RepoError;

/// Rows fetched for one batch of posts, keyed for lookup.
pub(crate) struct RelatedRows {
    pub authors: HashMap<i32, Author>,
    /// Already in display order.
    pub comments: Vec<Comment>,
    /// `(post_id, tag_id)` in link order.
    pub links: Vec<(i32, i32)>,
    pub tags: HashMap<i32, TagWithPostCount>,
}

impl RelatedRows {
    /// Author ids referenced by the posts and the fetched comments, deduplicated.
    pub fn author_ids(posts: &[Post], comments: &[Comment]) -> Vec<i32> {
        let mut ids: Vec<i32> = posts
            .iter()
            .map(|p| p.author_id)
            .chain(comments.iter().map(|c| c.author_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn assemble(self, posts: Vec<Post>) -> Result<Vec<PostWithRelated>, RepoError> {
        let mut comments_by_post: HashMap<i32, Vec<CommentWithAuthor>> = HashMap::new();
        for comment in self.comments {
            let author = author(&self.authors, comment.author_id)?;
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(CommentWithAuthor { comment, author });
        }

        let mut tags_by_post: HashMap<i32, Vec<TagWithPostCount>> = HashMap::new();
        for (post_id, tag_id) in self.links {
            let tag = self
                .tags
                .get(&tag_id)
                .cloned()
                .ok_or(RepoError::MissingRelation {
                    entity_type: "tag",
                    id: tag_id,
                })?;
            tags_by_post.entry(post_id).or_default().push(tag);
        }

        posts
            .into_iter()
            .map(|post| {
                let author = author(&self.authors, post.author_id)?;
                let comments = comments_by_post.get(&post.id).cloned().unwrap_or_default();
                let tags = tags_by_post.get(&post.id).cloned().unwrap_or_default();
                Ok(PostWithRelated {
                    post,
                    author,
                    comments,
                    tags,
                    comments_count: None,
                })
            })
            .collect()
    }
}

/// Set `comments_count` from a grouped count; posts absent from `counts` have none.
pub(crate) fn annotate_comment_counts(
    posts: Vec<PostWithRelated>,
    counts: &HashMap<i32, u64>,
) -> Vec<PostWithRelated> {
    posts
        .into_iter()
        .map(|mut post| {
            post.comments_count = Some(counts.get(&post.post.id).copied().unwrap_or(0));
            post
        })
        .collect()
}

fn author(authors: &HashMap<i32, Author>, id: i32) -> Result<Author, RepoError> {
    authors
        .get(&id)
        .cloned()
        .ok_or(RepoError::MissingRelation {
            entity_type: "author",
            id,
        })
}
