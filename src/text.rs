// SPDX-License-Identifier: MPL-2.0
//! Text helpers: keyword extraction, keyword highlighting and relative
//! timestamps.

use chrono::{DateTime, Local, Utc};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of keywords returned when the caller has no preference.
pub const DEFAULT_KEYWORD_COUNT: usize = 5;

/// Words too common to be useful as keywords.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "his", "has", "its", "who", "how", "why", "may", "too", "use", "she",
    "him", "get", "got", "let", "did", "yet", "than", "then", "them", "were", "what", "when",
    "into", "also", "that", "this", "with", "have", "will", "from", "they", "been", "said",
    "each", "which", "their", "time", "would", "there", "could", "other",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, always valid.
    PATTERN.get_or_init(|| Regex::new(r"\b\w{3,}\b").expect("valid keyword pattern"))
}

/// Returns the `count` most frequent words of `text`.
///
/// Words are lowercased runs of at least three word characters; stop words
/// are skipped. Words with equal frequency keep the order in which they first
/// appear.
#[must_use]
pub fn extract_keywords(text: &str, count: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in word_pattern().find_iter(&lowered).map(|m| m.as_str()) {
        if STOP_WORDS.contains(&word) {
            continue;
        }
        match index.get(word) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(word, order.len());
                order.push((word, 1));
            }
        }
    }

    // Stable sort: ties keep first-seen order.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(count)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// A run of text, either plain or matching one of the highlighted keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlight(String),
}

impl Segment {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Highlight(text) => text,
        }
    }

    #[must_use]
    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight(_))
    }
}

/// Splits `text` into plain and highlighted segments.
///
/// A keyword matches whole words only, case-insensitively; the original
/// casing of the text is preserved. Longer keywords win when keywords
/// overlap. Blank keywords are ignored.
#[must_use]
pub fn highlight_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> Vec<Segment> {
    let mut terms: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .collect();

    if terms.is_empty() || text.is_empty() {
        return plain_only(text);
    }

    terms.sort_by(|a, b| b.len().cmp(&a.len()));
    terms.dedup();
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::warn!(error = %err, "keyword pattern rejected, highlighting skipped");
            return plain_only(text);
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Plain(text[cursor..found.start()].to_string()));
        }
        segments.push(Segment::Highlight(found.as_str().to_string()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::Plain(text[cursor..].to_string()));
    }
    segments
}

fn plain_only(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::Plain(text.to_string())]
    }
}

/// Formats `timestamp` relative to `now`.
///
/// Under a minute reads "Just now", under an hour "Nm ago", under a day
/// "Nh ago"; anything older shows the local calendar date. Timestamps in the
/// future read "Just now".
#[must_use]
pub fn format_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", elapsed.num_minutes())
    } else if seconds < 86_400 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn extract_keywords_ranks_by_frequency_then_first_seen() {
        let keywords = extract_keywords(
            "the quick brown fox jumps over the lazy dog quick quick",
            3,
        );
        assert_eq!(keywords, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn extract_keywords_skips_stop_words_and_short_words() {
        let keywords = extract_keywords("This is it: with that, we go to photosynthesis", 5);
        assert_eq!(keywords, vec!["photosynthesis"]);
    }

    #[test]
    fn extract_keywords_is_case_insensitive() {
        let keywords = extract_keywords("Cell cell CELL membrane", 2);
        assert_eq!(keywords, vec!["cell", "membrane"]);
    }

    #[test]
    fn extract_keywords_handles_empty_text_and_zero_count() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("plenty of words here", 0).is_empty());
    }

    #[test]
    fn highlight_marks_whole_words_only() {
        let segments = highlight_keywords("cat catalog Cat", &["cat"]);
        assert_eq!(
            segments,
            vec![
                Segment::Highlight("cat".into()),
                Segment::Plain(" catalog ".into()),
                Segment::Highlight("Cat".into()),
            ]
        );
    }

    #[test]
    fn highlight_prefers_longer_keywords() {
        let segments = highlight_keywords("cell wall", &["cell", "cell wall"]);
        assert_eq!(segments, vec![Segment::Highlight("cell wall".into())]);
    }

    #[test]
    fn highlight_escapes_regex_metacharacters() {
        let segments = highlight_keywords("use c++ daily", &["c++", "(daily"]);
        assert!(segments.iter().all(|s| s.as_str() != "(daily"));
        let joined: String = segments.iter().map(Segment::as_str).collect();
        assert_eq!(joined, "use c++ daily");
    }

    #[test]
    fn highlight_without_keywords_returns_plain_text() {
        let none: [&str; 0] = [];
        assert_eq!(
            highlight_keywords("nothing to see", &none),
            vec![Segment::Plain("nothing to see".into())]
        );
        assert!(highlight_keywords("", &["x"]).is_empty());
    }

    #[test]
    fn format_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

        assert_eq!(format_time(now - Duration::seconds(5), now), "Just now");
        assert_eq!(format_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_time(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_time(now + Duration::minutes(10), now), "Just now");
    }

    #[test]
    fn format_time_shows_date_after_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let old = now - Duration::days(3);
        let expected = old.with_timezone(&Local).format("%Y-%m-%d").to_string();

        assert_eq!(format_time(old, now), expected);
    }
}
