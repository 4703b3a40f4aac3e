//! Score calculation for SEO analysis

use crate::{Grade, OnPageMetrics};

/// Overall score weights. Must sum to 1.0.
pub const PERFORMANCE_WEIGHT: f64 = 0.3;
pub const TECHNICAL_SEO_WEIGHT: f64 = 0.3;
pub const ON_PAGE_WEIGHT: f64 = 0.4;

/// On-page score penalties (deducted from a base of 100, floor 0)
const TITLE_MISSING_PENALTY: f64 = 20.0;
const TITLE_RANGE_PENALTY: f64 = 10.0;
const META_MISSING_PENALTY: f64 = 20.0;
const META_RANGE_PENALTY: f64 = 10.0;
const H1_STRUCTURE_PENALTY: f64 = 15.0;
const ALT_TEXT_PENALTY: f64 = 10.0;
const THIN_CONTENT_PENALTY: f64 = 15.0;

/// Recommended length brackets for on-page elements
pub const TITLE_MIN_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 60;
pub const META_MIN_LEN: usize = 120;
pub const META_MAX_LEN: usize = 160;
pub const THIN_CONTENT_WORDS: usize = 300;
pub const COMPREHENSIVE_CONTENT_WORDS: usize = 1500;
pub const MIN_INTERNAL_LINKS: usize = 3;

/// Fraction of images allowed to miss alt text before it counts as an
/// issue rather than an opportunity
pub const ALT_MISSING_RATIO_LIMIT: f64 = 0.2;

/// Calculator for SEO scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted overall score, each category clamped to 0-100 before
    /// weighting, rounded to one decimal
    pub fn overall(performance: f64, technical_seo: f64, on_page_seo: f64) -> f64 {
        let total = performance.clamp(0.0, 100.0) * PERFORMANCE_WEIGHT
            + technical_seo.clamp(0.0, 100.0) * TECHNICAL_SEO_WEIGHT
            + on_page_seo.clamp(0.0, 100.0) * ON_PAGE_WEIGHT;
        (total * 10.0).round() / 10.0
    }

    /// On-page score: base 100 minus independent fixed penalties.
    ///
    /// Penalties are computed separately from the issue list; a
    /// too-short title yields both the warning and the range penalty.
    pub fn on_page_score(metrics: &OnPageMetrics) -> f64 {
        let mut score = 100.0;

        if metrics.title_length == 0 {
            score -= TITLE_MISSING_PENALTY;
        } else if metrics.title_length < TITLE_MIN_LEN || metrics.title_length > TITLE_MAX_LEN {
            score -= TITLE_RANGE_PENALTY;
        }

        if metrics.meta_description_length == 0 {
            score -= META_MISSING_PENALTY;
        } else if metrics.meta_description_length < META_MIN_LEN
            || metrics.meta_description_length > META_MAX_LEN
        {
            score -= META_RANGE_PENALTY;
        }

        if metrics.h1_count != 1 {
            score -= H1_STRUCTURE_PENALTY;
        }

        if alt_text_ratio_excessive(metrics) {
            score -= ALT_TEXT_PENALTY;
        }

        if metrics.word_count < THIN_CONTENT_WORDS {
            score -= THIN_CONTENT_PENALTY;
        }

        score.max(0.0)
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - Strong SEO foundation across all categories",
            Grade::B => "Good - Solid SEO health with room for improvement",
            Grade::C => "Fair - Basic SEO in place but needs strengthening",
            Grade::D => "Poor - Significant SEO problems hurt visibility",
            Grade::F => "Failing - Major improvements needed to compete",
        }
    }
}

/// True when more than the allowed fraction of images misses alt text
pub fn alt_text_ratio_excessive(metrics: &OnPageMetrics) -> bool {
    metrics.total_images > 0
        && metrics.images_without_alt as f64 > metrics.total_images as f64 * ALT_MISSING_RATIO_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(title: usize, meta: usize, h1: usize, words: usize) -> OnPageMetrics {
        OnPageMetrics {
            title_length: title,
            meta_description_length: meta,
            h1_count: h1,
            word_count: words,
            ..OnPageMetrics::default()
        }
    }

    #[test]
    fn overall_weighting_and_rounding() {
        // 0.3*85 + 0.3*90 + 0.4*100 = 25.5 + 27.0 + 40.0
        assert_eq!(ScoreCalculator::overall(85.0, 90.0, 100.0), 92.5);
        assert_eq!(ScoreCalculator::overall(0.0, 0.0, 0.0), 0.0);
        assert_eq!(ScoreCalculator::overall(100.0, 100.0, 100.0), 100.0);
        // One decimal place: 25.5 + 27.6 + 30.8 = 83.9
        assert_eq!(ScoreCalculator::overall(85.0, 92.0, 77.0), 83.9);
    }

    #[test]
    fn overall_clamps_out_of_range_inputs() {
        // Malformed input can exceed the nominal range; terms clamp
        // before weighting so the result stays within 0-100
        assert_eq!(ScoreCalculator::overall(250.0, 100.0, 100.0), 100.0);
        assert_eq!(ScoreCalculator::overall(-50.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn on_page_perfect_scores_100() {
        let metrics = on_page(45, 150, 1, 2000);
        assert_eq!(ScoreCalculator::on_page_score(&metrics), 100.0);
    }

    #[test]
    fn on_page_missing_title_and_meta() {
        let metrics = on_page(0, 0, 1, 2000);
        assert_eq!(ScoreCalculator::on_page_score(&metrics), 60.0);
    }

    #[test]
    fn on_page_out_of_range_lighter_than_missing() {
        let short_title = on_page(10, 150, 1, 2000);
        assert_eq!(ScoreCalculator::on_page_score(&short_title), 90.0);
        let long_meta = on_page(45, 200, 1, 2000);
        assert_eq!(ScoreCalculator::on_page_score(&long_meta), 90.0);
    }

    #[test]
    fn on_page_all_penalties_compound() {
        // title missing (20) + meta missing (20) + h1 (15) + alt (10) + thin (15)
        let metrics = OnPageMetrics {
            title_length: 0,
            meta_description_length: 0,
            h1_count: 0,
            total_images: 10,
            images_without_alt: 5,
            word_count: 100,
            ..OnPageMetrics::default()
        };
        assert_eq!(ScoreCalculator::on_page_score(&metrics), 20.0);
    }

    #[test]
    fn on_page_score_stays_in_range() {
        let metrics = OnPageMetrics {
            title_length: 0,
            meta_description_length: 0,
            h1_count: 7,
            total_images: 3,
            images_without_alt: 3,
            word_count: 0,
            ..OnPageMetrics::default()
        };
        let score = ScoreCalculator::on_page_score(&metrics);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn alt_ratio_boundary_is_exclusive() {
        // Exactly 20% missing is tolerated
        let at_limit = OnPageMetrics {
            total_images: 10,
            images_without_alt: 2,
            ..OnPageMetrics::default()
        };
        assert!(!alt_text_ratio_excessive(&at_limit));

        let over_limit = OnPageMetrics {
            total_images: 10,
            images_without_alt: 3,
            ..OnPageMetrics::default()
        };
        assert!(alt_text_ratio_excessive(&over_limit));

        let no_images = OnPageMetrics::default();
        assert!(!alt_text_ratio_excessive(&no_images));
    }

    #[test]
    fn grade_description_all_grades() {
        assert!(ScoreCalculator::grade_description(Grade::A).contains("Excellent"));
        assert!(ScoreCalculator::grade_description(Grade::B).contains("Good"));
        assert!(ScoreCalculator::grade_description(Grade::C).contains("Fair"));
        assert!(ScoreCalculator::grade_description(Grade::D).contains("Poor"));
        assert!(ScoreCalculator::grade_description(Grade::F).contains("Failing"));
    }
}
