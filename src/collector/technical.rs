//! Technical SEO checks

use std::time::Instant;

use reqwest::header;
use url::Url;

use super::{Collector, CollectorError, PAGE_TIMEOUT, PROBE_TIMEOUT};
use crate::TechnicalMetrics;

impl Collector {
    pub(crate) fn technical(&self, target: &str) -> Result<TechnicalMetrics, CollectorError> {
        let parsed = Url::parse(target)?;

        let started = Instant::now();
        let response = self
            .probe_client
            .get(target)
            .timeout(PAGE_TIMEOUT)
            .send()?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let content_length = response.bytes().map(|body| body.len() as u64).unwrap_or(0);

        Ok(TechnicalMetrics {
            is_https: parsed.scheme() == "https",
            status_code,
            response_time_ms,
            content_type: header_string(&headers, header::CONTENT_TYPE),
            server: header_string(&headers, header::SERVER),
            content_length,
            has_cache_control: headers.contains_key(header::CACHE_CONTROL),
            has_compression: headers.contains_key(header::CONTENT_ENCODING),
            has_robots_txt: self.probe_ok(&parsed, "/robots.txt"),
            has_sitemap: self.probe_ok(&parsed, "/sitemap.xml"),
        })
    }

    /// Best-effort probe: true only when the path answers 200
    fn probe_ok(&self, base: &Url, path: &str) -> bool {
        let Ok(probe_url) = base.join(path) else {
            return false;
        };
        self.client
            .get(probe_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .map(|response| response.status() == reqwest::StatusCode::OK)
            .unwrap_or(false)
    }
}

fn header_string(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
