use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info};

use crate::error::FeedError;
use crate::feed::{self, Article};
use crate::fetcher::Fetcher;

pub struct AppState {
    pub fetcher: Fetcher,
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub feed_title: String,
    pub feed_description: String,
    pub generated_at: String,
    pub articles: Vec<Article>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

/// Uniform conversion of any pipeline failure into the minimal 500 page.
/// The page carries the error's message text without distinguishing kinds.
pub struct FeedPageError(FeedError);

impl IntoResponse for FeedPageError {
    fn into_response(self) -> Response {
        error!("Failed to build feed page: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            HtmlTemplate(ErrorTemplate {
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<FeedError> for FeedPageError {
    fn from(err: FeedError) -> Self {
        FeedPageError(err)
    }
}

// Route handlers
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, FeedPageError> {
    let xml = state.fetcher.fetch_feed().await?;
    let parsed = feed::parse_feed(&xml)?;

    info!(
        "Rendering {} articles from '{}'",
        parsed.articles.len(),
        parsed.metadata.title
    );

    Ok(HtmlTemplate(IndexTemplate {
        feed_title: parsed.metadata.title,
        feed_description: parsed.metadata.description,
        generated_at: Utc::now().format("%b %-d, %Y, %I:%M %p UTC").to_string(),
        articles: parsed.articles,
    }))
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
