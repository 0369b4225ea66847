use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::types::RawContent;

/// Pull article text and image candidates out of a fetched page.
///
/// Text comes from `article p` elements, each preceded by a newline.
/// Image candidates are every `img` with a `src`, in document order,
/// absolutized against the page URL; sources that cannot be resolved to
/// an absolute URL are dropped.
pub fn extract_content(html: &str, page_url: &str) -> RawContent {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let paragraph_sel = Selector::parse("article p").expect("valid selector");
    let image_sel = Selector::parse("img").expect("valid selector");

    let mut text = String::new();
    for element in document.select(&paragraph_sel) {
        text.push('\n');
        text.push_str(&element.text().collect::<String>());
    }

    let image_candidates: Vec<String> = document
        .select(&image_sel)
        .filter_map(|img| img.value().attr("src"))
        .filter_map(|src| resolve(base.as_ref(), src))
        .collect();

    debug!(
        "Extracted {} chars of article text, {} image candidates from {}",
        text.len(),
        image_candidates.len(),
        page_url
    );

    RawContent {
        text,
        image_candidates,
    }
}

fn resolve(base: Option<&Url>, src: &str) -> Option<String> {
    match base {
        Some(base) => base.join(src).ok().map(|u| u.to_string()),
        None => Url::parse(src).ok().map(|u| u.to_string()),
    }
}
