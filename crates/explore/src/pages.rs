//! Page-range parsing
//!
//! Turns a printed page range such as `"10-15"` into an article length.
//! Anything that is not exactly two integers around a single `-` has no
//! length and is left out of every aggregate.

use bizpub_common::Article;

/// Length of the page range `start-end`, inclusive of both pages.
///
/// Returns `None` when the range is missing a separator, has more than one,
/// either side is not an integer, or the length would be negative.
/// `"11-10"` is a zero-length range.
pub fn page_length(pages: &str) -> Option<u32> {
    let mut parts = pages.split('-');
    let (start, end) = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => (start, end),
        _ => return None,
    };

    let start: i64 = start.trim().parse().ok()?;
    let end: i64 = end.trim().parse().ok()?;

    let length = end - start + 1;
    if length < 0 {
        return None;
    }

    u32::try_from(length).ok()
}

/// Page length of an article, `None` when its range is absent or malformed
pub fn article_length(article: &Article) -> Option<u32> {
    article.pages.as_deref().and_then(page_length)
}

/// Valid page lengths of `articles` and the number that had none
pub fn collect_lengths<'a, I>(articles: I) -> (Vec<u32>, usize)
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut lengths = Vec::new();
    let mut dropped = 0;
    for article in articles {
        match article_length(article) {
            Some(len) => lengths.push(len),
            None => dropped += 1,
        }
    }
    (lengths, dropped)
}
