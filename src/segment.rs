//! Splits the extracted PDF text into one block per weekday.
//!
//! A block starts at a weekday anchor (`Montag 14. April`) and runs up to the
//! next anchor or the end of the document.

use std::sync::LazyLock;

use regex::Regex;

use crate::weekday::Weekday;

static DAY_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<day>Montag|Dienstag|Mittwoch|Donnerstag|Freitag|Samstag|Sonntag)\s*(?P<date>\d{1,2}\.(?:\s*(?:Januar|Februar|März|Maerz|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\b)?)",
    )
    .expect("day anchor regex is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock<'a> {
    pub weekday: Weekday,
    /// Date as printed, e.g. `14. April`. No year is available in the PDF.
    pub date: String,
    pub text: &'a str,
}

/// Returns the day blocks in document order. A document without anchors
/// yields no blocks.
pub fn day_blocks(text: &str) -> Vec<DayBlock<'_>> {
    let anchors: Vec<_> = DAY_ANCHOR.captures_iter(text).collect();

    let mut blocks = Vec::with_capacity(anchors.len());
    for (i, caps) in anchors.iter().enumerate() {
        let (Some(whole), Some(day), Some(date)) = (caps.get(0), caps.name("day"), caps.name("date"))
        else {
            continue;
        };
        let Some(weekday) = Weekday::from_name(day.as_str()) else {
            continue;
        };
        let end = anchors
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());

        blocks.push(DayBlock {
            weekday,
            date: WHITESPACE.replace_all(date.as_str(), " ").into_owned(),
            text: &text[whole.end()..end],
        });
    }

    tracing::debug!(blocks = blocks.len(), "segmented document");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_anchor_yields_nothing() {
        assert!(day_blocks("").is_empty());
        assert!(day_blocks("Menüplan\nKW 16\nIntern 7.40 / Extern 12.40").is_empty());
    }

    #[test]
    fn test_blocks_follow_document_order() {
        let text = "Kopfzeile\nMittwoch 16. April\nA\nDonnerstag 17. April\nB\nMontag 21. April\nC";
        let blocks = day_blocks(text);
        let days: Vec<_> = blocks.iter().map(|b| b.weekday).collect();
        assert_eq!(days, [Weekday::Mittwoch, Weekday::Donnerstag, Weekday::Montag]);
        assert_eq!(blocks[0].text.trim(), "A");
        assert_eq!(blocks[1].text.trim(), "B");
        assert_eq!(blocks[2].text.trim(), "C");
    }

    #[test]
    fn test_block_never_contains_next_anchor() {
        let text = "Montag 14. April\nSuppe\nDienstag 15. April\nEintopf\nMittwoch 16. April";
        let blocks = day_blocks(text);
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            for day in Weekday::ALL {
                assert!(!block.text.trim_start().starts_with(day.name()));
            }
        }
        assert_eq!(blocks[2].text, "");
    }

    #[test]
    fn test_date_is_kept_verbatim() {
        let blocks = day_blocks("Freitag 3.\nMärz\nFisch\nSamstag 4.");
        assert_eq!(blocks[0].date, "3. März");
        assert_eq!(blocks[0].text.trim(), "Fisch");
        assert_eq!(blocks[1].date, "4.");
    }

    #[test]
    fn test_month_must_be_a_month_name() {
        let blocks = day_blocks("Montag 14.\nSpaghetti\nSalat");
        assert_eq!(blocks[0].date, "14.");
        assert_eq!(blocks[0].text.trim(), "Spaghetti\nSalat");
    }

    #[test]
    fn test_weekday_without_date_is_not_an_anchor() {
        let blocks = day_blocks("Montag 14. April\nAm Freitag Fischknusperli\nDienstag 15. April\nx");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].text.contains("Am Freitag Fischknusperli"));
    }
}
