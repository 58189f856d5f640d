use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name reported for a venue when no name label is found in a post.
pub const UNKNOWN_VENUE_NAME: &str = "unknown";

/// Where a scraped post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    Blog,
    Knowledge,
    #[default]
    Other,
}

impl PostSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostSource::Blog => "blog",
            PostSource::Knowledge => "knowledge",
            PostSource::Other => "other",
        }
    }

    /// Unrecognised values map to `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "blog" => PostSource::Blog,
            "knowledge" => PostSource::Knowledge,
            _ => PostSource::Other,
        }
    }
}

impl fmt::Display for PostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped unit of free text about a venue. `url` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub source: PostSource,
}

impl Post {
    pub fn new(url: impl Into<String>, source: PostSource) -> Self {
        Self {
            url: url.into(),
            title: None,
            content: None,
            thumbnail: None,
            source,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// The body text, or `None` when it is absent or blank.
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}

/// Best-effort structured fields recovered from a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedVenueInfo {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub menu: Option<BTreeMap<String, String>>,
}

impl ExtractedVenueInfo {
    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN_VENUE_NAME
    }
}

impl Default for ExtractedVenueInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_VENUE_NAME.to_string(),
            address: None,
            phone: None,
            hours: None,
            menu: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewCategory {
    Taste,
    Service,
    Value,
    Cleanliness,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 4] = [
        ReviewCategory::Taste,
        ReviewCategory::Service,
        ReviewCategory::Value,
        ReviewCategory::Cleanliness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Taste => "taste",
            ReviewCategory::Service => "service",
            ReviewCategory::Value => "value",
            ReviewCategory::Cleanliness => "cleanliness",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category score captured from post text.
///
/// The score is carried through exactly as written in the post: zero,
/// negative and out-of-scale values are not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewScore {
    pub category: ReviewCategory,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReviewScore {
    pub fn new(category: ReviewCategory, score: i32) -> Self {
        Self {
            category,
            score,
            note: None,
        }
    }
}

/// A post paired with the review scores derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    pub post: Post,
    #[serde(default)]
    pub reviews: Vec<ReviewScore>,
}

impl ScoredPost {
    pub fn new(post: Post, reviews: Vec<ReviewScore>) -> Self {
        Self { post, reviews }
    }

    pub fn unscored(post: Post) -> Self {
        Self::new(post, Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strength,
    Mixed,
    Weakness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: ReviewCategory,
    pub average: f64,
    pub count: usize,
    pub band: ScoreBand,
}

/// Consensus over a batch of posts about one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsensusReport {
    pub do_points: Vec<String>,
    pub dont_points: Vec<String>,
    pub warnings: Vec<String>,
    pub overall_score: f64,
    pub post_count: usize,
    pub category_summaries: Vec<CategorySummary>,
}
