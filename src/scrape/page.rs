// src/scrape/page.rs

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Elements whose text is never part of the readable content.
const HIDDEN: &[&str] = &[
    "script", "style", "noscript", "template", "header", "footer", "nav", "aside",
];

static ARTICLE_PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article p, main p").expect("paragraph selector is valid")
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

/// Extracts the readable text of an HTML page.
///
/// Paragraphs inside `<article>`/`<main>` are used when present; otherwise
/// every visible text node of the body. Page chrome (header, footer,
/// navigation) and scripts are skipped in both cases.
pub fn extract_main_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(&ARTICLE_PARAGRAPHS)
        .map(visible_text)
        .filter(|p| !p.is_empty())
        .collect();

    if !paragraphs.is_empty() {
        return Some(paragraphs.join("\n"));
    }

    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    let text = visible_text(root);

    (!text.is_empty()).then_some(text)
}

fn visible_text(element: ElementRef<'_>) -> String {
    let words: Vec<&str> = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN.contains(&el.name()))
            });
            (!hidden).then_some(&**text)
        })
        .flat_map(str::split_whitespace)
        .collect();

    words.join(" ")
}
