//! HTTP handlers and route configuration.

mod health;
mod pages;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/post/{slug}", web::get().to(pages::post_detail))
        .route("/tag/{tag_title}", web::get().to(pages::tag_filter))
        .route("/contacts", web::get().to(pages::contacts))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use blog_infra::{InMemoryBlogStore, LocalMediaStorage, NewPost};
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::state::AppState;

    async fn seeded_state() -> AppState {
        let store = Arc::new(InMemoryBlogStore::new());
        let alice = store.add_author("alice").await.unwrap();
        let bob = store.add_author("bob").await.unwrap();
        let python = store.add_tag("python").await.unwrap();

        for (day, slug) in [(1, "py-one"), (3, "py-three"), (2, "py-two")] {
            let published_at = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
            let post = store
                .add_post(
                    NewPost::new(alice.id, slug, slug, published_at).with_text("About Python"),
                )
                .await
                .unwrap();
            store.tag_post(post.id, python.id).await.unwrap();
        }
        for (day, slug) in [(4, "plain-one"), (5, "plain-two")] {
            let published_at = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
            let post = store
                .add_post(NewPost::new(bob.id, slug, slug, published_at))
                .await
                .unwrap();
            store.like(post.id, alice.id).await.unwrap();
        }

        AppState::in_memory(store, Arc::new(LocalMediaStorage::default()))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_unknown_post_is_not_found() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get()
            .uri("/post/does-not-exist")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Not Found");
    }

    #[actix_web::test]
    async fn test_unknown_tag_is_not_found() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/tag/haskell").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_tag_filter_page() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/tag/python").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["template"], "posts-list.html");
        let context = &body["context"];
        assert_eq!(context["tag"], "python");

        let slugs: Vec<&str> = context["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["py-three", "py-two", "py-one"]);
        assert_eq!(
            context["posts"][0]["tags"],
            json!([{ "title": "python", "posts_with_tag": 3 }])
        );
        assert_eq!(context["posts"][0]["first_tag_title"], "python");
    }

    #[actix_web::test]
    async fn test_home_page() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["template"], "index.html");
        let context = &body["context"];
        assert_eq!(context["most_popular_posts"][0]["slug"], "plain-one");
        assert_eq!(context["most_popular_posts"][1]["slug"], "plain-two");
        assert_eq!(context["page_posts"][0]["slug"], "plain-two");
        assert!(context["page_posts"][0]["first_tag_title"].is_null());
        assert!(context["page_posts"][0]["image_url"].is_null());
        assert_eq!(context["page_posts"][0]["comments_amount"], 0);
        assert_eq!(context["popular_tags"][0]["title"], "python");
    }

    #[actix_web::test]
    async fn test_post_detail_page() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/post/plain-one").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["template"], "post-details.html");
        let post = &body["context"]["post"];
        assert_eq!(post["author"], "bob");
        assert_eq!(post["likes_amount"], 1);
        assert_eq!(post["comments"], json!([]));
        assert!(body["context"]["popular_tags"].is_array());
        assert!(body["context"]["most_popular_posts"].is_array());
    }

    #[actix_web::test]
    async fn test_contacts_page_is_static() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/contacts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "template": "contacts.html", "context": {} }));
    }

    #[actix_web::test]
    async fn test_health_reports_storage() {
        let app = app!(seeded_state().await);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
