//! Page handlers. Each responds with the template name and its context.

use actix_web::{HttpResponse, web};
use blog_shared::PageResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let context = state.pages.home().await?;
    Ok(HttpResponse::Ok().json(PageResponse::new("index.html", context)))
}

/// GET /post/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let context = state.pages.post_detail(&slug).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new("post-details.html", context)))
}

/// GET /tag/{tag_title}
pub async fn tag_filter(
    state: web::Data<AppState>,
    tag_title: web::Path<String>,
) -> AppResult<HttpResponse> {
    let context = state.pages.tag_filter(&tag_title).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new("posts-list.html", context)))
}

/// GET /contacts
pub async fn contacts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(PageResponse::new("contacts.html", state.pages.contacts()))
}
