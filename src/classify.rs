//! Assigns the positional slots of a day block to the restaurant's categories.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::PricePair;
use crate::normalize::split_allergen_tail;
use crate::profile::RestaurantProfile;
use crate::split::SplitBlock;

/// A line that only lists allergen codes, e.g. `1, 7, 9`.
static CODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d{1,2}(?:\s*[,;/]\s*\d{1,2})*\s*[,;/]?\s*$").expect("code line regex is valid")
});

/// `Fleisch: Schwein; Schweiz`, `Fisch: Norwegen`, `F: Schweiz`, ...
static ORIGIN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:Fleisch|Fisch|Meeresfrüchte|Geflügel|F)\s*:\s*\S").expect("origin line regex is valid")
});

/// Origin and allergen lines printed after a dish's price, which the splitter
/// leaves at the start of the following slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub origin_lines: Vec<&'a str>,
    pub code_lines: Vec<&'a str>,
}

impl Annotation<'_> {
    pub fn is_empty(&self) -> bool {
        self.origin_lines.is_empty() && self.code_lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedItem<'a> {
    pub category: &'static str,
    pub text: &'a str,
    pub price: Option<PricePair>,
    pub annotation: Annotation<'a>,
}

/// Splits the leading annotation off `slot`, returning it and the rest of the
/// slot. Stops at the first line that is neither an origin nor a code line.
pub fn peel_annotation(slot: &str) -> (Annotation<'_>, &str) {
    let mut annotation = Annotation::default();
    let mut consumed = 0;
    let mut offset = 0;

    for line in slot.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if CODE_LINE.is_match(trimmed) {
            annotation.code_lines.push(trimmed);
        } else if ORIGIN_LINE.is_match(trimmed)
            || continues_origin(&annotation, trimmed, consumed == start)
        {
            annotation.origin_lines.push(trimmed);
        } else {
            break;
        }
        consumed = offset;
    }

    (annotation, &slot[consumed..])
}

/// An origin list broken over lines ends the previous line with `,` or `;`
/// and goes on with another `animal; country` pair. A trailing separator
/// after allergen codes (`Schweiz 1, 7,`) closes the origin instead.
fn continues_origin(annotation: &Annotation<'_>, line: &str, adjacent: bool) -> bool {
    adjacent
        && annotation.code_lines.is_empty()
        && line.contains(';')
        && annotation.origin_lines.last().is_some_and(|prev| {
            let (_, codes) = split_allergen_tail(prev);
            codes.is_empty() && prev.ends_with([',', ';'])
        })
}

/// Walks the profile's categories in order, handing each one the next slot.
///
/// The omittable category is skipped when its day block is one slot short
/// and its slot carries no price; the PDF leaves no marker for it. Slots
/// beyond the last category are ignored rather than guessed into a category.
pub fn classify<'a>(split: SplitBlock<'a>, profile: &RestaurantProfile) -> Vec<ClassifiedItem<'a>> {
    let SplitBlock { mut slots, prices } = split;
    let categories = profile.categories;
    let mut items = Vec::with_capacity(categories.len());
    let mut cursor = 0;

    for (index, &category) in categories.iter().enumerate() {
        let next_is_blank = slots.get(index + 1).is_none_or(|s| s.trim().is_empty());
        let is_priced = index < prices.len();
        if profile.is_omittable(index)
            && !is_priced
            && next_is_blank
            && slots.len() < categories.len()
        {
            tracing::trace!(category, "optional category not offered");
            continue;
        }

        let Some(&text) = slots.get(cursor) else {
            break;
        };

        let annotation = match slots.get_mut(cursor + 1) {
            Some(next) => {
                let (annotation, rest) = peel_annotation(next);
                *next = rest;
                annotation
            }
            None => Annotation::default(),
        };

        items.push(ClassifiedItem {
            category,
            text,
            price: prices.get(cursor).copied(),
            annotation,
        });
        cursor += 1;
    }

    if slots.len() > cursor + 1 {
        tracing::debug!(
            restaurant = profile.id,
            unused = slots.len() - cursor,
            "ignoring slots beyond the last category"
        );
    }

    items
}
