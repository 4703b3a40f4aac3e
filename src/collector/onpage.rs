//! On-page SEO scraping

use scraper::{Html, Selector};
use url::Url;

use super::{Collector, CollectorError, PAGE_TIMEOUT};
use crate::OnPageMetrics;

/// How many H1 texts to carry into reports
const H1_SAMPLE: usize = 3;

impl Collector {
    pub(crate) fn on_page(&self, target: &str) -> Result<OnPageMetrics, CollectorError> {
        let base = Url::parse(target)?;
        let response = self
            .client
            .get(target)
            .timeout(PAGE_TIMEOUT)
            .send()?
            .error_for_status()?;
        let html = response.text()?;
        parse_on_page(&html, &base)
    }
}

/// Extract on-page SEO elements from page HTML
pub(crate) fn parse_on_page(html: &str, base: &Url) -> Result<OnPageMetrics, CollectorError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let meta_description = document
        .select(&selector(r#"meta[name="description"]"#)?)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    let h1_tags: Vec<String> = document
        .select(&selector("h1")?)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    let h2_count = document.select(&selector("h2")?).count();
    let h3_count = document.select(&selector("h3")?).count();

    let mut total_images = 0;
    let mut images_without_alt = 0;
    for img in document.select(&selector("img")?) {
        total_images += 1;
        if img.value().attr("alt").map_or(true, |alt| alt.trim().is_empty()) {
            images_without_alt += 1;
        }
    }

    let mut internal_links_count = 0;
    let mut external_links_count = 0;
    for link in document.select(&selector("a[href]")?) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        if resolved.host_str() == base.host_str() {
            internal_links_count += 1;
        } else {
            external_links_count += 1;
        }
    }

    let word_count = document
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .count();

    Ok(OnPageMetrics {
        title_length: title.as_deref().map(|t| t.chars().count()).unwrap_or(0),
        title,
        meta_description_length: meta_description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0),
        meta_description,
        h1_count: h1_tags.len(),
        h1_tags: h1_tags.into_iter().take(H1_SAMPLE).collect(),
        h2_count,
        h3_count,
        total_images,
        images_without_alt,
        internal_links_count,
        external_links_count,
        word_count,
    })
}

fn selector(css: &str) -> Result<Selector, CollectorError> {
    Selector::parse(css).map_err(|e| CollectorError::Parse(e.to_string()))
}
