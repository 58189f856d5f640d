//! Labeled patterns used to pull fields and scores out of post text.
//!
//! Every field pattern is a label, an optional `:` separator, then everything
//! up to the next line break or comma. Labels are tried as one alternation so
//! the first textual occurrence of any label wins.

use matjip_core::ReviewCategory;
use regex::Regex;
use std::sync::LazyLock;

const SEPARATOR: &str = r"[ \t]*[:：]?[ \t]*";
const FIELD_VALUE: &str = r"([^\s,:：][^\r\n,]*)";

fn field_pattern(labels: &str) -> Regex {
    let pattern = format!("(?:{labels}){SEPARATOR}{FIELD_VALUE}");
    Regex::new(&pattern).expect("field pattern must compile")
}

fn score_pattern(labels: &str) -> Regex {
    let pattern = format!(r"(?:{labels}){SEPARATOR}(-?\d+)[ \t]*점");
    Regex::new(&pattern).expect("score pattern must compile")
}

pub(crate) static NAME: LazyLock<Regex> = LazyLock::new(|| {
    field_pattern(r"가게[ \t]?이름|가게명|상호명|상호|매장명|카페[ \t]?이름|카페명")
});
pub(crate) static ADDRESS: LazyLock<Regex> = LazyLock::new(|| field_pattern("주소"));
pub(crate) static PHONE: LazyLock<Regex> =
    LazyLock::new(|| field_pattern(r"전화번호|전화|연락처|\b(?i:tel)\b"));
pub(crate) static HOURS: LazyLock<Regex> =
    LazyLock::new(|| field_pattern(r"영업[ \t]?시간|운영[ \t]?시간"));
pub(crate) static MENU: LazyLock<Regex> =
    LazyLock::new(|| field_pattern(r"대표[ \t]?메뉴|메뉴"));

/// "아메리카노 4500원" splits into item and price.
pub(crate) static MENU_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[ \t]+(\d+[ \t]*원)$").expect("menu price pattern must compile")
});

static TASTE: LazyLock<Regex> = LazyLock::new(|| score_pattern("맛"));
static SERVICE: LazyLock<Regex> = LazyLock::new(|| score_pattern("서비스|친절도|친절"));
static VALUE: LazyLock<Regex> = LazyLock::new(|| score_pattern("가성비|가격"));
static CLEANLINESS: LazyLock<Regex> = LazyLock::new(|| score_pattern("청결도|청결|위생"));

pub(crate) fn score_regex(category: ReviewCategory) -> &'static Regex {
    match category {
        ReviewCategory::Taste => &TASTE,
        ReviewCategory::Service => &SERVICE,
        ReviewCategory::Value => &VALUE,
        ReviewCategory::Cleanliness => &CLEANLINESS,
    }
}

/// First capture of `regex` in `content`, trimmed. Blank captures count as no match.
pub(crate) fn first_capture(regex: &Regex, content: &str) -> Option<String> {
    let captured = regex.captures(content)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}
