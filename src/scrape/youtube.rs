// src/scrape/youtube.rs

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::{error::AppError, scrape::ContentFetcher};

static CAPTION_LINES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("text, p").expect("caption selector is valid"));

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
    /// "asr" for auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

pub fn is_youtube_host(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com"),
        None => false,
    }
}

/// Video id from `watch?v=`, `youtu.be/`, `/shorts/`, `/embed/` or `/live/` links.
pub fn video_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if url.host_str() == Some("youtu.be") {
        segments.next().map(str::to_string)
    } else {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts" | "embed" | "live" | "v") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    candidate.filter(|id| {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Picks a caption track from the watch page's embedded player response.
/// English beats other languages, manual captions beat auto-generated ones.
pub fn caption_track_url(watch_html: &str) -> Option<String> {
    const MARKER: &str = "\"captionTracks\":";

    let start = watch_html.find(MARKER)? + MARKER.len();
    let tracks: Vec<CaptionTrack> = serde_json::Deserializer::from_str(&watch_html[start..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()?
        .ok()?;

    let rank = |track: &CaptionTrack| {
        let english = track.language_code.starts_with("en");
        let manual = track.kind.as_deref() != Some("asr");
        match (english, manual) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    };

    tracks
        .into_iter()
        .min_by_key(|track| rank(track))
        .map(|track| track.base_url)
}

/// Joins the caption lines of a timedtext document into plain text.
pub fn parse_transcript(xml: &str) -> String {
    let fragment = Html::parse_fragment(xml);

    let words: Vec<String> = fragment
        .select(&CAPTION_LINES)
        .map(|line| decode_entities(&line.text().collect::<String>()))
        .flat_map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    words.join(" ")
}

/// Caption text arrives escaped twice; the parser removes one layer.
fn decode_entities(text: &str) -> String {
    text.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub async fn fetch_transcript(fetcher: &dyn ContentFetcher, video_id: &str) -> Result<String, AppError> {
    let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
    let watch_html = fetcher.fetch(&watch_url).await?;

    let track_url = caption_track_url(&watch_html).ok_or_else(|| {
        AppError::Unprocessable("No transcript is available for this video".to_string())
    })?;

    let xml = fetcher.fetch(&track_url).await?;
    let transcript = parse_transcript(&xml);
    tracing::info!(video_id, chars = transcript.len(), "Transcript fetched");

    Ok(transcript)
}
