//! PageSpeed Insights collection

use std::time::Duration;

use serde_json::Value;

use super::{Collector, CollectorError};
use crate::PageSpeedMetrics;

const ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// The API runs a full Lighthouse pass; it is slow
const PAGESPEED_TIMEOUT: Duration = Duration::from_secs(60);

/// Lighthouse analysis strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(Strategy::Mobile),
            "desktop" => Ok(Strategy::Desktop),
            other => Err(format!(
                "unknown strategy: {other} (expected mobile or desktop)"
            )),
        }
    }
}

impl Collector {
    pub(crate) fn page_speed(&self, target: &str) -> Result<PageSpeedMetrics, CollectorError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("url", target),
                ("strategy", self.strategy.as_str()),
                ("category", "performance"),
                ("category", "seo"),
                ("category", "accessibility"),
            ])
            .timeout(PAGESPEED_TIMEOUT)
            .send()?
            .error_for_status()?;

        let body: Value = response.json()?;
        Ok(parse_pagespeed_body(&body))
    }
}

/// Mine the Lighthouse result out of the API response. Missing fields
/// degrade to zero values; the analyzer treats those as poor scores
/// rather than failing the section.
pub(crate) fn parse_pagespeed_body(body: &Value) -> PageSpeedMetrics {
    let categories = &body["lighthouseResult"]["categories"];
    let audits = &body["lighthouseResult"]["audits"];

    PageSpeedMetrics {
        performance_score: category_score(categories, "performance"),
        seo_score: category_score(categories, "seo"),
        accessibility_score: category_score(categories, "accessibility"),
        mobile_friendly: audits["viewport"]["score"].as_f64() == Some(1.0),
        first_contentful_paint: display_value(audits, "first-contentful-paint"),
        largest_contentful_paint: display_value(audits, "largest-contentful-paint"),
        speed_index: display_value(audits, "speed-index"),
        total_blocking_time: display_value(audits, "total-blocking-time"),
        cumulative_layout_shift: display_value(audits, "cumulative-layout-shift"),
    }
}

/// Lighthouse category scores are 0-1; scale to 0-100
fn category_score(categories: &Value, name: &str) -> f64 {
    categories[name]["score"].as_f64().unwrap_or(0.0) * 100.0
}

fn display_value(audits: &Value, audit: &str) -> Option<String> {
    audits[audit]["displayValue"].as_str().map(str::to_string)
}
