//! Collect candidate URLs from every surface of a static HTML page.
//!
//! Three zones are scanned with the pattern extractor: every attribute value
//! of every element, the text content of `<body>`, and every string leaf of
//! the page's JSON-LD blocks. Whatever is found is resolved against the
//! page's final URL, deduplicated, and sorted.

use std::collections::HashSet;

use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::extract::extract;
use crate::http_client::HttpClient;
use crate::types::FontgrabResult;

/// Fetch `page_url` and return every URL referenced on the page.
///
/// A failed page fetch (transport error or non-success status) is fatal.
pub async fn scan(client: &HttpClient, page_url: &str) -> FontgrabResult<Vec<String>> {
    let page = client.get_page(page_url).await?;
    tracing::debug!(
        url = %page.url,
        final_url = %page.final_url,
        bytes = page.body.len(),
        "fetched page"
    );

    let urls = scan_document(&page.body, &page.final_url);
    tracing::info!(count = urls.len(), "discovered URLs on page");
    Ok(urls)
}

/// Scan already-fetched HTML. `base_url` is used to absolutize relative hits.
pub fn scan_document(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut raw: HashSet<String> = HashSet::new();

    // 1. Attribute values
    let all = Selector::parse("*").expect("universal selector is valid");
    for element in document.select(&all) {
        for (_, value) in element.value().attrs() {
            raw.extend(extract(value.trim()));
        }
    }

    // 2. Body text
    let body_sel = Selector::parse("body").expect("body selector is valid");
    let body_text: String = document
        .select(&body_sel)
        .next()
        .map(|body| body.text().collect())
        .unwrap_or_default();
    raw.extend(extract(&body_text));

    // 3. JSON-LD
    let jsonld_sel = Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("json-ld selector is valid");
    for script in document.select(&jsonld_sel) {
        let text: String = script.text().collect();
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => collect_json_strings(&value, &mut raw),
            Err(e) => tracing::debug!(error = %e, "skipping malformed JSON-LD block"),
        }
    }

    absolutize_all(raw, base_url)
}

/// Walk a decoded JSON value and extract from every string leaf.
fn collect_json_strings(value: &Value, out: &mut HashSet<String>) {
    match value {
        Value::String(s) => out.extend(extract(s)),
        Value::Array(items) => {
            for item in items {
                collect_json_strings(item, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_json_strings(item, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Resolve against `base_url` where possible, then sort and dedup.
fn absolutize_all(raw: HashSet<String>, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();

    let mut urls: Vec<String> = raw
        .into_iter()
        .map(|u| match base.as_ref().map(|b| b.join(&u)) {
            Some(Ok(resolved)) => resolved.to_string(),
            _ => u,
        })
        .collect();

    urls.sort();
    urls.dedup();
    urls
}
