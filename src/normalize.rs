//! Turns a classified slot into a [`DishRecord`].

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::ClassifiedItem;
use crate::model::{DietaryType, DishRecord};

/// Slot text that means the line is not served that day.
const CLOSED_MARKERS: [&str; 3] = ["Geschlossen", "Feiertag", "Betriebsferien"];

/// Footer text that ends up in the last slot of a page.
const ALLERGEN_BOILERPLATE: &str = "Für Fragen zu den einzelnen Gerichten";

/// Allergen codes the splitter left in front of the next dish: either a
/// separated list (`1, 7`) or a single code alone on its line.
static LEADING_CODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d{1,2}(?:[ \t]*[,;][ \t]*\d{1,2})+[ \t]*[,;]?|\d{1,2}[ \t]*[,;]?[ \t]*(?:\n|$))")
        .expect("leading codes regex is valid")
});

/// Allergen codes and separators at the end of an origin line.
static ALLERGEN_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s,;/]*(?:\b(?P<codes>\d{1,2}(?:\s*[,;/]\s*\d{1,2})*))?[\s,;/]*$")
        .expect("allergen tail regex is valid")
});

static REPEATED_COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("comma regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Builds the dish for one category, or `None` when nothing is served.
pub fn normalize(item: &ClassifiedItem<'_>) -> Option<DishRecord> {
    let text = LEADING_CODES.replace(item.text, "");
    let text = text.trim();
    if is_absent(text) {
        return None;
    }

    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let title = collapse_whitespace(lines.next()?);
    if title.is_empty() {
        return None;
    }
    let description = clean_description(lines);

    let mut allergens = Vec::new();
    let mut origins = Vec::new();
    for line in &item.annotation.origin_lines {
        let (origin, codes) = split_allergen_tail(line);
        if !origin.is_empty() && !origin.ends_with(':') {
            origins.push(collapse_whitespace(origin));
        }
        push_codes(&mut allergens, codes);
    }
    for line in &item.annotation.code_lines {
        push_codes(&mut allergens, line);
    }
    let origin = (!origins.is_empty()).then(|| origins.join(", "));

    let dietary_type = dietary_type(item.category, &title, &description, origin.is_some());

    Some(DishRecord {
        title,
        description,
        category: item.category.to_string(),
        price: item.price,
        origin,
        allergens: (!allergens.is_empty()).then_some(allergens),
        dietary_type,
    })
}

fn is_absent(text: &str) -> bool {
    if text.is_empty() || text.contains(ALLERGEN_BOILERPLATE) {
        return true;
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| CLOSED_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(line)))
}

fn clean_description<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let joined = lines.collect::<Vec<_>>().join(", ");
    let joined = joined.replace(" ,", ",").replace("&,", "&");
    let joined = REPEATED_COMMAS.replace_all(&joined, ",");
    collapse_whitespace(&joined)
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Splits `Fleisch: Schweiz 1, 7` into `Fleisch: Schweiz` and `1, 7`.
pub(crate) fn split_allergen_tail(line: &str) -> (&str, &str) {
    match ALLERGEN_TAIL.captures(line) {
        Some(caps) => {
            let start = caps.get(0).map_or(line.len(), |m| m.start());
            let codes = caps.name("codes").map_or("", |m| m.as_str());
            (line[..start].trim(), codes)
        }
        None => (line.trim(), ""),
    }
}

fn push_codes(allergens: &mut Vec<String>, codes: &str) {
    for code in codes.split([',', ';', '/']).map(str::trim) {
        if !code.is_empty() && !allergens.iter().any(|a| a == code) {
            allergens.push(code.to_string());
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn dietary_type(category: &str, title: &str, description: &str, has_origin: bool) -> Option<DietaryType> {
    if has_origin {
        return Some(DietaryType::Meat);
    }
    let text = format!("{title} {description}").to_lowercase();
    if text.contains("vegan") {
        Some(DietaryType::Vegan)
    } else if category.to_lowercase().starts_with("vegi") || text.contains("vegetarisch") {
        Some(DietaryType::Vegetarian)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Annotation;
    use crate::model::{Price, PricePair};

    fn item<'a>(category: &'static str, text: &'a str, annotation: Annotation<'a>) -> ClassifiedItem<'a> {
        ClassifiedItem {
            category,
            text,
            price: None,
            annotation,
        }
    }

    #[test]
    fn test_title_and_description() {
        let dish = normalize(&item(
            "Local",
            "\n  Spaghetti   Bolognese \nHausgemacht\n\nParmesan ,\nSalat &\nDessert\n",
            Annotation::default(),
        ))
        .unwrap();
        assert_eq!(dish.title, "Spaghetti Bolognese");
        assert_eq!(dish.description, "Hausgemacht, Parmesan, Salat & Dessert");
        assert_eq!(dish.category, "Local");
        assert!(dish.price.is_none());
    }

    #[test]
    fn test_closed_and_boilerplate_are_absent() {
        for text in [
            "",
            "  \n ",
            "Geschlossen",
            "\nGESCHLOSSEN\n",
            "Geschlossen\nGeschlossen",
            "Feiertag",
            "Für Fragen zu den einzelnen Gerichten wenden Sie sich an unser Personal",
            "1, 7\n",
        ] {
            assert!(normalize(&item("Vegi", text, Annotation::default())).is_none(), "{text:?}");
        }
    }

    #[test]
    fn test_leading_code_artifact_is_stripped() {
        let dish = normalize(&item("Vegi", "1, 3, 7\nRisotto\nPilze", Annotation::default())).unwrap();
        assert_eq!(dish.title, "Risotto");
        assert_eq!(dish.description, "Pilze");

        let dish = normalize(&item("Vegi", "2 Spiegeleier\nSpinat", Annotation::default())).unwrap();
        assert_eq!(dish.title, "2 Spiegeleier");
    }

    #[test]
    fn test_origin_and_allergens_are_separated() {
        let annotation = Annotation {
            origin_lines: vec!["Fleisch: Schwein; Schweiz 1, 7, 9 /"],
            code_lines: vec!["9, 12"],
        };
        let mut item = item("Local", "Schnitzel\nPommes", annotation);
        item.price = Some(PricePair {
            intern: Price::from_centimes(950),
            external: Price::from_centimes(1450),
        });

        let dish = normalize(&item).unwrap();
        assert_eq!(dish.origin.as_deref(), Some("Fleisch: Schwein; Schweiz"));
        assert_eq!(dish.allergens, Some(vec!["1".into(), "7".into(), "9".into(), "12".into()]));
        assert_eq!(dish.price, item.price);
        assert_eq!(dish.dietary_type, Some(DietaryType::Meat));
    }

    #[test]
    fn test_origin_keeps_years_and_drops_empty_origin() {
        assert_eq!(split_allergen_tail("Fisch: Norwegen, "), ("Fisch: Norwegen", ""));
        assert_eq!(split_allergen_tail("Fleisch: Schweiz;"), ("Fleisch: Schweiz", ""));
        assert_eq!(split_allergen_tail("F: Schweiz 2024"), ("F: Schweiz 2024", ""));

        let annotation = Annotation {
            origin_lines: vec!["F: 3, 4"],
            code_lines: vec![],
        };
        let dish = normalize(&item("Local", "Eintopf", annotation)).unwrap();
        assert_eq!(dish.origin, None);
        assert_eq!(dish.allergens, Some(vec!["3".into(), "4".into()]));
    }

    #[test]
    fn test_multi_line_origin_is_joined() {
        let annotation = Annotation {
            origin_lines: vec!["Fleisch: Rind; Schweiz,", "Schwein; Deutschland 7"],
            code_lines: vec![],
        };
        let dish = normalize(&item("Local", "Burger", annotation)).unwrap();
        assert_eq!(
            dish.origin.as_deref(),
            Some("Fleisch: Rind; Schweiz, Schwein; Deutschland")
        );
        assert_eq!(dish.allergens, Some(vec!["7".into()]));
    }

    #[test]
    fn test_dietary_type() {
        let vegan = normalize(&item("Local", "Tofu Bowl\nvegan", Annotation::default())).unwrap();
        assert_eq!(vegan.dietary_type, Some(DietaryType::Vegan));

        let vegi = normalize(&item("Vegi", "Käsespätzle", Annotation::default())).unwrap();
        assert_eq!(vegi.dietary_type, Some(DietaryType::Vegetarian));

        let unknown = normalize(&item("Buffet", "Salatbuffet", Annotation::default())).unwrap();
        assert_eq!(unknown.dietary_type, None);
    }
}
