//! Heuristic field and score extraction from free-text venue posts.
//!
//! Nothing here fails: a label that is not present simply leaves the field
//! unset.

mod patterns;


use matjip_core::{ExtractedVenueInfo, Post, ReviewCategory, ReviewScore, ScoredPost};
use std::collections::BTreeMap;
use tracing::trace;

pub const MENU_MAIN_KEY: &str = "main";

use patterns::{first_capture, score_regex, ADDRESS, HOURS, MENU, MENU_PRICE, NAME, PHONE};

/// Recover venue name, address, phone, hours and menu from a post body.
///
/// Each field is searched independently. The first occurrence of a field's
/// label governs, even when it sits inside another field's value.
pub fn extract_venue_info(content: &str) -> ExtractedVenueInfo {
    let mut info = ExtractedVenueInfo::default();
    if let Some(name) = first_capture(&NAME, content) {
        info.name = name;
    }
    info.address = first_capture(&ADDRESS, content);
    info.phone = first_capture(&PHONE, content);
    info.hours = first_capture(&HOURS, content);
    info.menu = first_capture(&MENU, content).map(|menu| parse_menu(&menu));

    trace!(
        name = %info.name,
        has_address = info.address.is_some(),
        has_phone = info.phone.is_some(),
        has_hours = info.hours.is_some(),
        has_menu = info.menu.is_some(),
        "extracted venue info"
    );
    info
}

/// The whole capture is kept under `main`; a trailing price adds `item → price`.
fn parse_menu(text: &str) -> BTreeMap<String, String> {
    let mut menu = BTreeMap::new();
    menu.insert(MENU_MAIN_KEY.to_string(), text.to_string());
    if let Some(caps) = MENU_PRICE.captures(text) {
        menu.insert(caps[1].trim().to_string(), caps[2].trim().to_string());
    }
    menu
}

/// Pull at most one score per category, in category order.
///
/// Scores are not range checked. A number too large for `i32` is treated as
/// if the category were not mentioned.
pub fn extract_review_scores(content: &str) -> Vec<ReviewScore> {
    ReviewCategory::ALL
        .iter()
        .filter_map(|&category| {
            let caps = score_regex(category).captures(content)?;
            let score = caps[1].parse::<i32>().ok()?;
            Some(ReviewScore::new(category, score))
        })
        .collect()
}

/// Pair a post with the scores found in its body.
pub fn score_post(post: &Post) -> ScoredPost {
    let reviews = post.text().map(extract_review_scores).unwrap_or_default();
    ScoredPost::new(post.clone(), reviews)
}

pub fn score_posts(posts: &[Post]) -> Vec<ScoredPost> {
    posts.iter().map(score_post).collect()
}
