//! Collapses a comma-joined candidate list to one value.
//!
//! The widest `X<a>-X<b>` range wins; without a usable range the most
//! frequent item wins, earliest first on ties.

/// Resolves `"E01, E01-E05, E03"` style strings.
///
/// ```
/// use torrentmeta_core::resolve;
///
/// assert_eq!(resolve("E01, E01-E05, E03").as_deref(), Some("E01-E05"));
/// assert_eq!(resolve("S01, S02, S01").as_deref(), Some("S01"));
/// assert_eq!(resolve(" , "), None);
/// ```
pub fn resolve(candidates: &str) -> Option<String> {
    let items: Vec<&str> = candidates
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        return None;
    }

    let mut widest: Option<(&str, u32)> = None;
    for item in &items {
        let Some((low, high)) = range_bounds(item) else {
            continue;
        };
        let width = high.saturating_sub(low);
        if widest.is_none_or(|(_, best)| width > best) {
            widest = Some((item, width));
        }
    }

    match widest {
        Some((item, width)) if width > 0 => Some(item.to_owned()),
        _ => most_frequent(&items).map(str::to_owned),
    }
}

/// `X<a>-X<b>` with the same single letter on both ends.
fn range_bounds(item: &str) -> Option<(u32, u32)> {
    let (left, right) = item.split_once('-')?;
    let (prefix_a, a) = split_prefix(left)?;
    let (prefix_b, b) = split_prefix(right)?;
    if !prefix_a.eq_ignore_ascii_case(&prefix_b) {
        return None;
    }
    Some((a.parse().ok()?, b.parse().ok()?))
}

fn split_prefix(part: &str) -> Option<(char, &str)> {
    let mut chars = part.chars();
    let prefix = chars.next().filter(char::is_ascii_alphabetic)?;
    let digits = chars.as_str();
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some((prefix, digits))
}

fn most_frequent<'a>(items: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    // `max_by_key` keeps the last maximum, so fold from the front instead.
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (item, n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((item, n)),
        })
        .map(|(item, _)| item)
}
