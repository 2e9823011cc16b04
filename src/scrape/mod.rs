// src/scrape/mod.rs

//! Content acquisition for the summarizer: web pages, YouTube transcripts
//! and uploaded PDFs.

pub mod page;
pub mod pdf;
pub mod youtube;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::AppError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches a URL and returns the response body as text.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        tracing::info!(url, "Fetching content");

        let body = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// YouTube video id.
    Video(String),
    Page(Url),
}

/// Decides how a submitted URL is read.
pub fn classify(raw: &str) -> Result<Source, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|_| AppError::BadRequest("URL is not valid".to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::BadRequest(
            "Only http and https URLs are supported".to_string(),
        ));
    }

    if youtube::is_youtube_host(&url) {
        let id = youtube::video_id(&url).ok_or_else(|| {
            AppError::BadRequest("Could not find a video id in the URL".to_string())
        })?;
        return Ok(Source::Video(id));
    }

    Ok(Source::Page(url))
}

/// Returns the readable text behind `raw_url`: the transcript for a
/// video link, the main text for any other page.
pub async fn fetch_text(fetcher: &dyn ContentFetcher, raw_url: &str) -> Result<String, AppError> {
    let text = match classify(raw_url)? {
        Source::Video(id) => youtube::fetch_transcript(fetcher, &id).await?,
        Source::Page(url) => {
            let html = fetcher.fetch(url.as_str()).await?;
            page::extract_main_text(&html).unwrap_or_default()
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Unprocessable(
            "No content could be extracted from the URL".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_video_links() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").unwrap(),
            Source::Video("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            classify("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            Source::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_classify_page() {
        match classify("https://en.wikipedia.org/wiki/Photosynthesis").unwrap() {
            Source::Page(url) => assert_eq!(url.host_str(), Some("en.wikipedia.org")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert!(matches!(classify("not a url"), Err(AppError::BadRequest(_))));
        assert!(matches!(
            classify("ftp://example.com/file"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            classify("https://www.youtube.com/feed/trending"),
            Err(AppError::BadRequest(_))
        ));
    }
}
