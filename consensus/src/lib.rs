//! Consensus analysis over a batch of posts about one venue.
//!
//! The report is rebuilt from scratch on every call. Points keep the order in
//! which they were discovered; nothing is ranked.

mod points;


use extractor::extract_venue_info;
use matjip_core::{
    AnalysisConfig, CategorySummary, ConsensusReport, ReviewCategory, ScoreBand, ScoredPost,
};
use points::{contains_any, keyword_window, PointList};
use tracing::debug;

pub const MENU_KEYWORDS: &[&str] = &[
    "메뉴", "음식", "식사", "코스", "세트메뉴", "메인메뉴", "사이드메뉴", "디저트",
];

pub const PREFERENCE_KEYWORDS: &[&str] = &[
    "좋아", "최애", "좋아하는", "싫어", "최애하는", "별로", "별로 안",
];

pub const POSITIVE_MARKERS: &[&str] = &["좋아", "최고", "훌륭한", "최상", "추천", "재방문", "또 갈게요"];

// "비추천" also contains the positive marker "추천".
pub const NEGATIVE_MARKERS: &[&str] = &["별로", "아쉬운", "최악", "최저", "비추천", "안 가요"];

pub const POSITIVE_LABEL: &str = "긍정 평가";
pub const NEGATIVE_LABEL: &str = "부정 평가";

pub const LOW_SAMPLE_WARNING: &str = "포스팅 수가 부족하여 신뢰성 있는 분석이 어렵습니다";
pub const DIVERGENT_OPINION_WARNING: &str =
    "개인적인 의견 차이가 큽니다. 환경/상황에 따라 평가가 다를 수 있습니다";

pub const STRENGTH_THRESHOLD: f64 = 4.0;
pub const WEAKNESS_THRESHOLD: f64 = 2.0;

/// Analyze a batch with the default settings.
pub fn analyze_batch(posts: &[ScoredPost]) -> ConsensusReport {
    ConsensusAnalyzer::default().analyze(posts)
}

#[derive(Debug, Clone, Default)]
pub struct ConsensusAnalyzer {
    config: AnalysisConfig,
}

impl ConsensusAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, posts: &[ScoredPost]) -> ConsensusReport {
        let overall_score = overall_score(posts);
        let do_points = self.common_points(posts, overall_score);
        let (dont_points, opinions_diverge) = self.divergent_points(posts);
        let warnings = self.warnings(posts, opinions_diverge);

        debug!(
            posts = posts.len(),
            do_points = do_points.len(),
            dont_points = dont_points.len(),
            warnings = warnings.len(),
            overall_score,
            "analyzed batch"
        );

        ConsensusReport {
            do_points,
            dont_points,
            warnings,
            overall_score,
            post_count: posts.len(),
            category_summaries: category_summaries(posts),
        }
    }

    fn common_points(&self, posts: &[ScoredPost], overall_score: f64) -> Vec<String> {
        let mut points = PointList::default();

        for text in posts.iter().filter_map(|scored| scored.post.text()) {
            if let Some(window) = keyword_window(text, MENU_KEYWORDS, self.config.menu_window) {
                points.push(window);
            }
        }

        for text in posts.iter().filter_map(|scored| scored.post.text()) {
            let info = extract_venue_info(text);
            if info.has_name() {
                points.push(info.name);
            }
        }

        if has_reviews(posts) {
            points.push(format!("평균 별점: {}", format_average(overall_score)));
        }

        points.into_vec()
    }

    /// Returns the DONT points and whether both opinion labels were found.
    fn divergent_points(&self, posts: &[ScoredPost]) -> (Vec<String>, bool) {
        let mut points = PointList::default();

        for text in posts.iter().filter_map(|scored| scored.post.text()) {
            if let Some(window) =
                keyword_window(text, PREFERENCE_KEYWORDS, self.config.preference_window)
            {
                points.push(window);
            }
        }

        for scored in posts
            .iter()
            .filter(|scored| !scored.reviews.is_empty())
            .take(self.config.criteria_posts)
        {
            for review in &scored.reviews {
                points.push(format!("{}: {}", review.category, review.score));
            }
        }

        let mut positive = false;
        let mut negative = false;
        for text in posts.iter().filter_map(|scored| scored.post.text()) {
            if contains_any(text, POSITIVE_MARKERS) {
                positive = true;
                points.push(POSITIVE_LABEL);
            }
            if contains_any(text, NEGATIVE_MARKERS) {
                negative = true;
                points.push(NEGATIVE_LABEL);
            }
        }

        (points.into_vec(), positive && negative)
    }

    fn warnings(&self, posts: &[ScoredPost], opinions_diverge: bool) -> Vec<String> {
        let mut warnings = Vec::new();
        if posts.len() < self.config.min_posts {
            warnings.push(LOW_SAMPLE_WARNING.to_string());
        }
        if opinions_diverge {
            warnings.push(DIVERGENT_OPINION_WARNING.to_string());
        }
        warnings
    }
}

fn has_reviews(posts: &[ScoredPost]) -> bool {
    posts.iter().any(|scored| !scored.reviews.is_empty())
}

/// One decimal place, ties rounded away from zero (2.25 → "2.3").
pub fn format_average(average: f64) -> String {
    format!("{:.1}", (average * 10.0).round() / 10.0)
}

/// Mean of every score in the batch, 0 when there are none.
pub fn overall_score(posts: &[ScoredPost]) -> f64 {
    let scores: Vec<i32> = posts
        .iter()
        .flat_map(|scored| scored.reviews.iter().map(|review| review.score))
        .collect();
    mean(&scores)
}

fn mean(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: i64 = scores.iter().map(|&score| i64::from(score)).sum();
    total as f64 / scores.len() as f64
}

pub fn score_band(average: f64) -> ScoreBand {
    if average >= STRENGTH_THRESHOLD {
        ScoreBand::Strength
    } else if average <= WEAKNESS_THRESHOLD {
        ScoreBand::Weakness
    } else {
        ScoreBand::Mixed
    }
}

/// Per-category averages for categories that were scored at least once.
pub fn category_summaries(posts: &[ScoredPost]) -> Vec<CategorySummary> {
    ReviewCategory::ALL
        .iter()
        .filter_map(|&category| {
            let scores: Vec<i32> = posts
                .iter()
                .flat_map(|scored| scored.reviews.iter())
                .filter(|review| review.category == category)
                .map(|review| review.score)
                .collect();
            if scores.is_empty() {
                return None;
            }
            let average = mean(&scores);
            Some(CategorySummary {
                category,
                average,
                count: scores.len(),
                band: score_band(average),
            })
        })
        .collect()
}
