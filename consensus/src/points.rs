/// Ordered list of unique strings. Later duplicates are dropped.
#[derive(Debug, Default)]
pub(crate) struct PointList {
    items: Vec<String>,
}

impl PointList {
    pub(crate) fn push(&mut self, point: impl Into<String>) -> bool {
        let point = point.into();
        if self.items.contains(&point) {
            return false;
        }
        self.items.push(point);
        true
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Text around the first keyword (in list order) present in `content`.
///
/// The window keeps `radius` characters before the keyword and `radius`
/// characters after it, clamped to the content, and is trimmed.
pub(crate) fn keyword_window(content: &str, keywords: &[&str], radius: usize) -> Option<String> {
    keywords.iter().find_map(|keyword| {
        let byte_start = content.find(keyword)?;
        let char_start = content[..byte_start].chars().count();
        let from = char_start.saturating_sub(radius);
        let to = char_start + keyword.chars().count() + radius;
        let window: String = content.chars().skip(from).take(to - from).collect();
        Some(window.trim().to_string())
    })
}

pub(crate) fn contains_any(content: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| content.contains(marker))
}
