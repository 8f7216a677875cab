use std::fmt;

/// A canonical season reading, rendered the way it is keyed during disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonValue {
    /// Single season: "S07"
    Single(u32),

    /// Season span: "S01-S06"
    Span(u32, u32),

    /// Unnumbered complete-season phrase: "Complete Season"
    Phrase(&'static str),
}

impl SeasonValue {
    /// Builds a span, collapsing equal ends into a single season and ordering the ends.
    pub fn span(a: u32, b: u32) -> Self {
        if a == b {
            Self::Single(a)
        } else {
            Self::Span(a.min(b), a.max(b))
        }
    }

    /// Season numbers this value claims, for season/episode cross-checks.
    pub fn numbers(&self) -> Vec<u32> {
        match *self {
            Self::Single(n) => vec![n],
            Self::Span(a, b) => vec![a, b],
            Self::Phrase(_) => Vec::new(),
        }
    }
}

impl fmt::Display for SeasonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(n) => write!(f, "S{n:02}"),
            Self::Span(a, b) => write!(f, "S{a:02}-S{b:02}"),
            Self::Phrase(label) => f.write_str(label),
        }
    }
}

/// A canonical episode reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeValue {
    /// Single episode: "E05"
    Single(u32),

    /// Episode range: "E01-E05"
    Span(u32, u32),

    /// Episode count ("11 episodes"): "E1-E11", unpadded.
    Count(u32),

    /// Spelled-out part ("Part Two"): "Part2"
    Part(u32),

    /// Generic phrase: "All Episodes", "Season Finale"
    Phrase(&'static str),

    /// OVA, bonus or special episode.
    Special,
}

impl fmt::Display for EpisodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(n) => write!(f, "E{n:02}"),
            Self::Span(a, b) => write!(f, "E{a:02}-E{b:02}"),
            Self::Count(n) => write!(f, "E1-E{n}"),
            Self::Part(n) => write!(f, "Part{n}"),
            Self::Phrase(label) => f.write_str(label),
            Self::Special => f.write_str("Special"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_value_display() {
        assert_eq!(SeasonValue::Single(7).to_string(), "S07");
        assert_eq!(SeasonValue::Single(112).to_string(), "S112");
        assert_eq!(SeasonValue::Span(1, 6).to_string(), "S01-S06");
        assert_eq!(SeasonValue::Phrase("Complete Season").to_string(), "Complete Season");
    }

    #[test]
    fn season_span_normalizes_ends() {
        assert_eq!(SeasonValue::span(3, 3), SeasonValue::Single(3));
        assert_eq!(SeasonValue::span(5, 2), SeasonValue::Span(2, 5));
        assert_eq!(SeasonValue::span(2, 5).numbers(), vec![2, 5]);
    }

    #[test]
    fn episode_value_display() {
        assert_eq!(EpisodeValue::Single(5).to_string(), "E05");
        assert_eq!(EpisodeValue::Single(1084).to_string(), "E1084");
        assert_eq!(EpisodeValue::Span(1, 12).to_string(), "E01-E12");
        assert_eq!(EpisodeValue::Count(11).to_string(), "E1-E11");
        assert_eq!(EpisodeValue::Part(2).to_string(), "Part2");
        assert_eq!(EpisodeValue::Phrase("All Episodes").to_string(), "All Episodes");
        assert_eq!(EpisodeValue::Special.to_string(), "Special");
    }
}
