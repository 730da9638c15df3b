use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use wb_core::{Article, ArticleId, WordFrequency};

use crate::download;
use crate::error::{ApiError, ApiResult, MessageResponse};
use crate::AppState;

pub const REFRESH_MESSAGE: &str = "Articles refreshed successfully";

/// An article as listed by the API, with word frequencies computed on read.
#[derive(Debug, Serialize)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub title: String,
    pub link: String,
    pub word_frequencies: Vec<WordFrequency>,
    pub created_at: DateTime<Utc>,
}

impl ArticleSummary {
    fn from_article(article: Article, state: &AppState) -> Self {
        let word_frequencies = state
            .analyzer
            .analyze(article.content_or_empty(), state.max_words);
        Self {
            id: article.id,
            title: article.title,
            link: article.link,
            word_frequencies,
            created_at: article.created_at,
        }
    }
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ArticleSummary>>> {
    let articles = state.storage.list_all().await?;
    Ok(Json(
        articles
            .into_iter()
            .map(|article| ArticleSummary::from_article(article, &state))
            .collect(),
    ))
}

pub async fn download_article(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Response> {
    // ids that are not integers can never name an article
    let id: ArticleId = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => return Err(ApiError::UnknownArticle(raw_id)),
    };
    let article = state.storage.get(id).await?;
    let headers = download::attachment_headers(&article)?;
    Ok((headers, download::render_document(&article)).into_response())
}

pub async fn refresh_articles(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    let report = state.manager.refresh().await;
    info!(inserted = report.inserted, "Refresh requested over HTTP");
    Json(MessageResponse::new(REFRESH_MESSAGE))
}
