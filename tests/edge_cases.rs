//! Edge-case and property tests for the scoring engine.

use proptest::prelude::*;
use seoscan::analyzer::{AnalysisEngine, ScoreCalculator};
use seoscan::{
    CollectedData, OnPageMetrics, PageSpeedMetrics, Section, Severity, TechnicalMetrics,
};

fn record(
    page_speed: Section<PageSpeedMetrics>,
    on_page: Section<OnPageMetrics>,
    technical: Section<TechnicalMetrics>,
) -> CollectedData {
    CollectedData {
        url: "https://example.com".to_string(),
        timestamp: String::new(),
        domain: "example.com".to_string(),
        page_speed,
        on_page,
        technical,
    }
}

#[test]
fn empty_section_objects_score_with_zero_defaults() {
    // A record whose sections deserialized from `{}`: every field at its
    // zero value. Scoring stays total instead of raising.
    let json = r#"{"url": "https://example.com", "pageSpeed": {}, "onPage": {}, "technical": {}}"#;
    let data: CollectedData = serde_json::from_str(json).unwrap();

    let result = AnalysisEngine::new().analyze(&data);
    // performance 0 -> critical; seo 0 -> warning; not mobile-friendly -> critical
    // title/meta/h1 missing -> criticals; not https + status 0 -> criticals
    assert!(result.critical_count() >= 6);
    // on-page: 100 - 20 - 20 - 15 - 15 = 30; overall = 0.4 * 30
    assert_eq!(result.scores.on_page_seo, 30.0);
    assert_eq!(result.scores.overall, 12.0);
}

#[test]
fn absent_sections_cannot_deserialize_but_null_fields_degrade() {
    // Extra unknown fields are tolerated throughout
    let json = r#"{
        "url": "https://example.com",
        "pageSpeed": {"performanceScore": 91, "seoScore": 95, "mobileFriendly": true, "labData": "ignored"},
        "onPage": {"titleLength": 40, "metaDescriptionLength": 140, "h1Count": 1, "wordCount": 2000, "internalLinksCount": 9, "scrapeVersion": 3},
        "technical": {"isHttps": true, "statusCode": 200, "responseTimeMs": 120, "hasRobotsTxt": true, "hasSitemap": true, "hasCompression": true}
    }"#;
    let data: CollectedData = serde_json::from_str(json).unwrap();
    let result = AnalysisEngine::new().analyze(&data);
    assert!(result.issues.is_empty());
    assert_eq!(result.scores.overall, 95.8);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn overall_always_within_bounds(
        performance in -50.0f64..200.0,
        technical in -50.0f64..200.0,
        on_page in -50.0f64..200.0,
    ) {
        let overall = ScoreCalculator::overall(performance, technical, on_page);
        prop_assert!((0.0..=100.0).contains(&overall));
        // One decimal place
        prop_assert_eq!((overall * 10.0).round() / 10.0, overall);
    }

    #[test]
    fn on_page_score_always_within_bounds(
        title in 0usize..300,
        meta in 0usize..400,
        h1 in 0usize..10,
        total_images in 0usize..100,
        missing_alt in 0usize..100,
        words in 0usize..10_000,
    ) {
        let metrics = OnPageMetrics {
            title_length: title,
            meta_description_length: meta,
            h1_count: h1,
            total_images,
            images_without_alt: missing_alt.min(total_images),
            word_count: words,
            ..OnPageMetrics::default()
        };
        let score = ScoreCalculator::on_page_score(&metrics);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn analysis_never_panics_and_respects_invariants(
        performance in 0.0f64..=100.0,
        seo in 0.0f64..=100.0,
        mobile in any::<bool>(),
        speed_errored in any::<bool>(),
        on_page_errored in any::<bool>(),
        technical_errored in any::<bool>(),
        title in 0usize..100,
        words in 0usize..5_000,
        status in prop::sample::select(vec![200u16, 301, 404, 500]),
    ) {
        let page_speed = if speed_errored {
            Section::Unavailable { error: "boom".to_string() }
        } else {
            Section::Available(PageSpeedMetrics {
                performance_score: performance,
                seo_score: seo,
                mobile_friendly: mobile,
                ..PageSpeedMetrics::default()
            })
        };
        let on_page = if on_page_errored {
            Section::Unavailable { error: "boom".to_string() }
        } else {
            Section::Available(OnPageMetrics {
                title_length: title,
                word_count: words,
                ..OnPageMetrics::default()
            })
        };
        let technical = if technical_errored {
            Section::Unavailable { error: "boom".to_string() }
        } else {
            Section::Available(TechnicalMetrics {
                is_https: true,
                status_code: status,
                ..TechnicalMetrics::default()
            })
        };

        let result = AnalysisEngine::new().analyze(&record(page_speed, on_page, technical));

        prop_assert!((0.0..=100.0).contains(&result.scores.overall));
        let expected = ((0.3 * result.scores.performance
            + 0.3 * result.scores.technical_seo
            + 0.4 * result.scores.on_page_seo) * 10.0).round() / 10.0;
        prop_assert_eq!(result.scores.overall, expected);

        // Errored sections score zero and contribute exactly one warning
        if speed_errored {
            prop_assert_eq!(result.scores.performance, 0.0);
            prop_assert_eq!(result.scores.technical_seo, 0.0);
        }
        if on_page_errored {
            prop_assert_eq!(result.scores.on_page_seo, 0.0);
        }
        let unavailable_warnings = result
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Warning && i.details.is_some())
            .count();
        let errored = [speed_errored, on_page_errored, technical_errored]
            .iter()
            .filter(|e| **e)
            .count();
        prop_assert_eq!(unavailable_warnings, errored);
    }

    #[test]
    fn scoring_is_deterministic(
        performance in 0.0f64..=100.0,
        seo in 0.0f64..=100.0,
        title in 0usize..100,
    ) {
        let data = record(
            Section::Available(PageSpeedMetrics {
                performance_score: performance,
                seo_score: seo,
                mobile_friendly: true,
                ..PageSpeedMetrics::default()
            }),
            Section::Available(OnPageMetrics {
                title_length: title,
                ..OnPageMetrics::default()
            }),
            Section::Available(TechnicalMetrics {
                is_https: true,
                status_code: 200,
                ..TechnicalMetrics::default()
            }),
        );

        let engine = AnalysisEngine::new();
        let first = engine.analyze(&data);
        let second = engine.analyze(&data);
        prop_assert_eq!(first.scores, second.scores);
        prop_assert_eq!(first.issues, second.issues);
        prop_assert_eq!(first.strengths, second.strengths);
        prop_assert_eq!(first.opportunities, second.opportunities);
    }
}
