
use consensus::ConsensusAnalyzer;
use database::PostRepository;
use extractor::{extract_venue_info, score_posts};
use matjip_core::{AnalysisConfig, ConsensusReport, CoreError, ExtractedVenueInfo, Post};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct VenueReport {
    pub venue: String,
    pub info: ExtractedVenueInfo,
    pub report: ConsensusReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub stored: usize,
    pub skipped: usize,
}

/// Builds venue reports from posts held in a repository.
pub struct VenueReportService<R> {
    repository: R,
    analyzer: ConsensusAnalyzer,
}

impl<R: PostRepository> VenueReportService<R> {
    pub fn new(repository: R, config: AnalysisConfig) -> Self {
        Self {
            repository,
            analyzer: ConsensusAnalyzer::new(config),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Store a batch of scraped posts. Posts whose url is already stored are
    /// skipped; any other failure stops the import.
    pub async fn import_posts(
        &self,
        venue: &str,
        posts: &[Post],
    ) -> Result<ImportSummary, CoreError> {
        let mut summary = ImportSummary::default();
        for post in posts {
            match self.repository.save_post(venue, post).await {
                Ok(()) => summary.stored += 1,
                Err(e) if e.is_duplicate() => {
                    warn!(venue, url = %post.url, "skipping already stored post");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            venue,
            stored = summary.stored,
            skipped = summary.skipped,
            "imported posts"
        );
        Ok(summary)
    }

    pub async fn report_for_venue(&self, venue: &str) -> Result<VenueReport, CoreError> {
        let posts = self.repository.posts_for_venue(venue).await?;
        if posts.is_empty() {
            return Err(CoreError::NotFound {
                resource: format!("venue '{}'", venue),
            });
        }
        debug!(
            venue,
            total = posts.len(),
            with_content = posts.iter().filter(|p| p.text().is_some()).count(),
            "loaded posts for venue"
        );

        Ok(build_report(venue, &posts, &self.analyzer))
    }
}

/// Analyze an in-memory batch without a repository.
///
/// Posts without content are dropped before scoring.
pub fn build_report(venue: &str, posts: &[Post], analyzer: &ConsensusAnalyzer) -> VenueReport {
    let posts: Vec<Post> = posts
        .iter()
        .filter(|p| p.text().is_some())
        .cloned()
        .collect();
    let scored = score_posts(&posts);
    let report = analyzer.analyze(&scored);

    info!(
        venue,
        posts = report.post_count,
        overall_score = report.overall_score,
        warnings = report.warnings.len(),
        "built venue report"
    );

    VenueReport {
        venue: venue.to_string(),
        info: venue_info(&posts),
        report,
    }
}

/// Info from the first post that names the venue, else the first post's info.
fn venue_info(posts: &[Post]) -> ExtractedVenueInfo {
    let mut fallback = None;
    for text in posts.iter().filter_map(Post::text) {
        let info = extract_venue_info(text);
        if info.has_name() {
            return info;
        }
        if fallback.is_none() {
            fallback = Some(info);
        }
    }
    fallback.unwrap_or_default()
}
