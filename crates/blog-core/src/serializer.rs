//! View-model serializer - flattens loaded entities into template-ready views.

use blog_shared::views::{CommentView, PostDetailView, PostSummaryView, TagView};

use crate::domain::{CommentWithAuthor, PostWithRelated, TagWithPostCount};
use crate::error::DomainError;
use crate::ports::MediaStorage;

/// Serialize a post for list views.
///
/// The post must have gone through the comment-count annotator; a missing count is
/// reported as [`DomainError::MissingAnnotation`].
pub fn serialize_post(
    post: &PostWithRelated,
    media: &dyn MediaStorage,
) -> Result<PostSummaryView, DomainError> {
    let comments_amount = post
        .comments_count
        .ok_or(DomainError::MissingAnnotation("comments_count"))?;

    Ok(PostSummaryView {
        title: post.post.title.clone(),
        teaser_text: post.post.teaser(),
        author: post.author.username.clone(),
        comments_amount,
        image_url: image_url(post, media),
        published_at: post.post.published_at,
        slug: post.post.slug.clone(),
        tags: post.tags.iter().map(serialize_tag).collect(),
        first_tag_title: post.first_tag().map(|t| t.tag.title.clone()),
    })
}

pub fn serialize_tag(tag: &TagWithPostCount) -> TagView {
    TagView {
        title: tag.tag.title.clone(),
        posts_with_tag: tag.posts_count,
    }
}

pub fn serialize_comment(comment: &CommentWithAuthor) -> CommentView {
    CommentView {
        text: comment.comment.text.clone(),
        published_at: comment.comment.published_at,
        author: comment.author.username.clone(),
    }
}

/// Serialize a post for its own page.
pub fn serialize_post_detail(
    post: &PostWithRelated,
    likes_count: u64,
    media: &dyn MediaStorage,
) -> PostDetailView {
    PostDetailView {
        title: post.post.title.clone(),
        text: post.post.text.clone(),
        author: post.author.username.clone(),
        comments: post.comments.iter().map(serialize_comment).collect(),
        likes_amount: likes_count,
        image_url: image_url(post, media),
        published_at: post.post.published_at,
        slug: post.post.slug.clone(),
        tags: post.tags.iter().map(serialize_tag).collect(),
    }
}

fn image_url(post: &PostWithRelated, media: &dyn MediaStorage) -> Option<String> {
    post.post.image.as_deref().and_then(|name| media.url(name))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{Author, Comment, Post, Tag, TEASER_LENGTH};

    struct PrefixMedia;

    impl MediaStorage for PrefixMedia {
        fn url(&self, name: &str) -> Option<String> {
            Some(format!("/media/{}", name))
        }
    }

    fn loaded_post(text: &str, tags: Vec<TagWithPostCount>) -> PostWithRelated {
        let author = Author {
            id: 7,
            username: "alice".to_string(),
        };
        PostWithRelated {
            post: Post {
                id: 1,
                author_id: author.id,
                title: "Ownership".to_string(),
                text: text.to_string(),
                slug: "ownership".to_string(),
                published_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                image: None,
            },
            author,
            comments: vec![],
            tags,
            comments_count: Some(0),
        }
    }

    fn tag(id: i32, title: &str, posts_count: u64) -> TagWithPostCount {
        TagWithPostCount {
            tag: Tag {
                id,
                title: title.to_string(),
            },
            posts_count,
        }
    }

    #[test]
    fn test_untagged_post_has_no_first_tag() {
        let view = serialize_post(&loaded_post("body", vec![]), &PrefixMedia).unwrap();

        assert_eq!(view.first_tag_title, None);
        assert!(view.tags.is_empty());
    }

    #[test]
    fn test_first_tag_follows_link_order() {
        let post = loaded_post("body", vec![tag(5, "rust", 2), tag(2, "async", 9)]);
        let view = serialize_post(&post, &PrefixMedia).unwrap();

        assert_eq!(view.first_tag_title.as_deref(), Some("rust"));
        assert_eq!(
            view.tags,
            vec![
                TagView {
                    title: "rust".to_string(),
                    posts_with_tag: 2
                },
                TagView {
                    title: "async".to_string(),
                    posts_with_tag: 9
                },
            ]
        );
    }

    #[test]
    fn test_teaser_is_truncated() {
        let long = "x".repeat(TEASER_LENGTH + 50);
        let view = serialize_post(&loaded_post(&long, vec![]), &PrefixMedia).unwrap();
        assert_eq!(view.teaser_text.chars().count(), TEASER_LENGTH);

        let view = serialize_post(&loaded_post("tiny", vec![]), &PrefixMedia).unwrap();
        assert_eq!(view.teaser_text, "tiny");
    }

    #[test]
    fn test_missing_comment_count_fails() {
        let mut post = loaded_post("body", vec![]);
        post.comments_count = None;

        let err = serialize_post(&post, &PrefixMedia).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingAnnotation("comments_count")
        ));
    }

    #[test]
    fn test_image_url_resolved_through_media() {
        let mut post = loaded_post("body", vec![]);
        let view = serialize_post(&post, &PrefixMedia).unwrap();
        assert_eq!(view.image_url, None);

        post.post.image = Some("covers/rust.png".to_string());
        let view = serialize_post(&post, &PrefixMedia).unwrap();
        assert_eq!(view.image_url.as_deref(), Some("/media/covers/rust.png"));
    }

    #[test]
    fn test_detail_includes_comments_and_likes() {
        let mut post = loaded_post("full body text", vec![tag(1, "rust", 1)]);
        post.comments.push(CommentWithAuthor {
            comment: Comment {
                id: 3,
                post_id: 1,
                author_id: 8,
                text: "Nice".to_string(),
                published_at: Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(),
            },
            author: Author {
                id: 8,
                username: "bob".to_string(),
            },
        });

        let view = serialize_post_detail(&post, 4, &PrefixMedia);

        assert_eq!(view.text, "full body text");
        assert_eq!(view.likes_amount, 4);
        assert_eq!(view.comments.len(), 1);
        assert_eq!(view.comments[0].author, "bob");
        assert_eq!(view.tags[0].title, "rust");
    }
}
