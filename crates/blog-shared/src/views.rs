//! Template-ready view models.
//!
//! Field names are the keys templates read, so renaming a field is a breaking change
//! for every renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag as shown in tag clouds and post footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagView {
    pub title: String,
    pub posts_with_tag: u64,
}

/// A post as shown in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummaryView {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagView>,
    pub first_tag_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

/// A post as shown on its own page, with the full body and all comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailView {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentView>,
    pub likes_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeContext {
    pub most_popular_posts: Vec<PostSummaryView>,
    pub page_posts: Vec<PostSummaryView>,
    pub popular_tags: Vec<TagView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailContext {
    pub post: PostDetailView,
    pub popular_tags: Vec<TagView>,
    pub most_popular_posts: Vec<PostSummaryView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagFilterContext {
    pub tag: String,
    pub popular_tags: Vec<TagView>,
    pub posts: Vec<PostSummaryView>,
    pub most_popular_posts: Vec<PostSummaryView>,
}

/// The contacts page has no dynamic data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsContext {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keys_match_list_template() {
        let view = PostSummaryView {
            title: "Hello".to_string(),
            teaser_text: "Hi".to_string(),
            author: "alice".to_string(),
            comments_amount: 0,
            image_url: None,
            published_at: Utc::now(),
            slug: "hello".to_string(),
            tags: vec![],
            first_tag_title: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "author",
                "comments_amount",
                "first_tag_title",
                "image_url",
                "published_at",
                "slug",
                "tags",
                "teaser_text",
                "title",
            ]
        );
        assert!(json["image_url"].is_null());
        assert!(json["first_tag_title"].is_null());
    }

    #[test]
    fn test_contacts_context_is_empty_object() {
        let json = serde_json::to_value(ContactsContext::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
