use serde::Serialize;

/// Weekday names as they appear in the menu PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weekday {
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
    Samstag,
    Sonntag,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
        Weekday::Samstag,
        Weekday::Sonntag,
    ];

    /// Maps `0..=6` to a weekday. Anything else, including the `-1` "all days"
    /// sentinel, means "do not filter" and yields `None`.
    pub fn from_ordinal(ordinal: i64) -> Option<Weekday> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Montag => "Montag",
            Weekday::Dienstag => "Dienstag",
            Weekday::Mittwoch => "Mittwoch",
            Weekday::Donnerstag => "Donnerstag",
            Weekday::Freitag => "Freitag",
            Weekday::Samstag => "Samstag",
            Weekday::Sonntag => "Sonntag",
        }
    }

    pub fn from_name(name: &str) -> Option<Weekday> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Day selection coming from the outside world (usually a path segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Lenient: anything that is not an ordinal in `0..=6` selects all days.
    pub fn from_path_segment(segment: &str) -> DayFilter {
        segment
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(Weekday::from_ordinal)
            .map_or(DayFilter::All, DayFilter::Day)
    }

    pub fn weekday(self) -> Option<Weekday> {
        match self {
            DayFilter::All => None,
            DayFilter::Day(day) => Some(day),
        }
    }
}
