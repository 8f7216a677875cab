use std::collections::BTreeSet;

use tracing::trace;

use crate::registry::{Entry, PatternRegistry, YearForm};

/// Numeric literals already claimed by years, resolutions, sizes and codecs.
///
/// Literals are compared exactly as written: `"01"` and `"1"` are different
/// entries. The set is harvested once per title and frozen before any
/// season or episode candidate is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    numbers: BTreeSet<String>,
}

impl ExclusionSet {
    /// Harvests every claimed literal from a normalized title.
    pub fn harvest(registry: &PatternRegistry, normalized: &str) -> Self {
        let mut numbers = BTreeSet::new();

        let years = registry.year.iter().filter(|e| e.form != YearForm::Short);
        for entry in years {
            collect_groups(entry, normalized, &mut numbers);
        }
        for entry in &registry.resolution {
            collect_groups(entry, normalized, &mut numbers);
        }
        for entry in &registry.filesize {
            collect_groups(entry, normalized, &mut numbers);
        }
        for entry in &registry.video_codec {
            collect_groups(entry, normalized, &mut numbers);
        }

        // Audio tokens and channel layouts: "5.1" claims "5.1" and "1".
        for entry in &registry.audio_codec {
            for caps in entry.matcher.captures_iter(normalized) {
                for part in registry.numeric_part.captures_iter(&caps[0]) {
                    numbers.insert(part[0].to_owned());
                    if let Some(minor) = part.get(1) {
                        numbers.insert(minor.as_str().to_owned());
                    }
                }
            }
        }

        for caps in registry.bit_depth.captures_iter(normalized) {
            numbers.insert(caps[1].to_owned());
        }

        trace!(?numbers, "harvested exclusions");
        Self { numbers }
    }

    /// Builds a set from literal strings.
    pub fn from_literals<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numbers: literals.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.numbers.contains(literal)
    }

    /// True if any of the literals is claimed.
    pub fn claims_any(&self, literals: &[&str]) -> bool {
        literals.iter().any(|l| self.contains(l))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.numbers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Inserts every capture group of every match.
fn collect_groups<F>(entry: &Entry<F>, haystack: &str, out: &mut BTreeSet<String>) {
    for caps in entry.matcher.captures_iter(haystack) {
        out.extend(caps.iter().skip(1).flatten().map(|m| m.as_str().to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest(normalized: &str) -> ExclusionSet {
        let registry = PatternRegistry::shared().unwrap();
        ExclusionSet::harvest(&registry, normalized)
    }

    #[test]
    fn test_harvest_longmire() {
        let set = harvest(
            "Longmire (2012) Season 1-6 S01-S06 1080p BluRay x265 HEVC 10bit AAC 5.1 Silence",
        );
        for literal in ["2012", "1080", "265", "10", "5.1", "1"] {
            assert!(set.contains(literal), "missing {literal}");
        }
        // Literal comparison: the padded season numbers stay available.
        assert!(!set.contains("01"));
        assert!(!set.contains("06"));
        assert!(!set.contains("6"));
    }

    #[test]
    fn test_harvest_sizes_and_dimensions() {
        let set = harvest("Movie 2019 1920x1080 H.264 DDP5.1 1.4GB 700 MB");
        for literal in ["2019", "1920", "1080", "264", "5.1", "1", "1.4", "700"] {
            assert!(set.contains(literal), "missing {literal}");
        }
    }

    #[test]
    fn test_harvest_year_range() {
        let set = harvest("Trashopolis 11 episodes 2010-2011 SATRip [Hurtom]");
        assert!(set.contains("2010"));
        assert!(set.contains("2011"));
        assert!(!set.contains("11"));
    }

    #[test]
    fn test_empty_title_has_no_exclusions() {
        assert!(harvest("Plain Title").is_empty());
    }

    #[test]
    fn test_from_literals() {
        let set = ExclusionSet::from_literals(["2019", "5.1"]);
        assert_eq!(set.len(), 2);
        assert!(set.claims_any(&["01", "2019"]));
        assert!(!set.claims_any(&["01"]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["2019", "5.1"]);
    }
}
