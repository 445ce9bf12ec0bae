use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::weekday::Weekday;

/// An amount in CHF, kept in centimes so repeated runs serialize identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    centimes: u32,
}

impl Price {
    pub fn from_centimes(centimes: u32) -> Self {
        Self { centimes }
    }

    pub fn centimes(self) -> u32 {
        self.centimes
    }

    /// Parses `7.40`, `7.4` or `7,40`.
    pub fn parse(input: &str) -> Option<Price> {
        let (whole, fraction) = input.trim().split_once(['.', ','])?;
        let whole = whole.parse::<u32>().ok()?;
        let fraction = match fraction.len() {
            1 => fraction.parse::<u32>().ok()? * 10,
            2 => fraction.parse::<u32>().ok()?,
            _ => return None,
        };
        Some(Price {
            centimes: whole.checked_mul(100)?.checked_add(fraction)?,
        })
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.centimes / 100, self.centimes % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(f64::from(self.centimes) / 100.0)
    }
}

/// Staff and guest price. Either both are printed or the dish has no price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePair {
    pub intern: Price,
    #[serde(rename = "extern")]
    pub external: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryType {
    Meat,
    Vegetarian,
    Vegan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub title: String,
    pub description: String,
    /// Serialized as the key of the dish inside its day.
    #[serde(skip)]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PricePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_type: Option<DietaryType>,
}

/// All dishes offered on one day, in the restaurant's category order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayMenu {
    pub day: Weekday,
    pub date: String,
    pub dishes: Vec<DishRecord>,
}

impl DayMenu {
    pub fn dish(&self, category: &str) -> Option<&DishRecord> {
        self.dishes.iter().find(|dish| dish.category == category)
    }
}

/// Serializes as `{"day": .., "date": .., "<category>": {..}, ..}`.
impl Serialize for DayMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.dishes.len()))?;
        map.serialize_entry("day", &self.day)?;
        map.serialize_entry("date", &self.date)?;
        for dish in &self.dishes {
            map.serialize_entry(&dish.category, dish)?;
        }
        map.end()
    }
}

/// Days of one document in the order they were printed.
pub type MenuSet = Vec<DayMenu>;

/// Result of an extraction run, with or without a weekday filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MenuSelection {
    Week(MenuSet),
    Day(Option<DayMenu>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("7.40"), Some(Price::from_centimes(740)));
        assert_eq!(Price::parse("7.4"), Some(Price::from_centimes(740)));
        assert_eq!(Price::parse("12,05"), Some(Price::from_centimes(1205)));
        assert_eq!(Price::parse("12"), None);
        assert_eq!(Price::parse("1.234"), None);
        assert_eq!(Price::from_centimes(905).to_string(), "9.05");
    }

    #[test]
    fn test_day_menu_shape() {
        let menu = DayMenu {
            day: Weekday::Montag,
            date: "14. April".to_string(),
            dishes: vec![DishRecord {
                title: "Spaghetti Bolognese".to_string(),
                description: "Hausgemacht".to_string(),
                category: "Local".to_string(),
                price: Some(PricePair {
                    intern: Price::from_centimes(740),
                    external: Price::from_centimes(1240),
                }),
                origin: Some("Fleisch: Rind; Schweiz".to_string()),
                allergens: None,
                dietary_type: Some(DietaryType::Meat),
            }],
        };

        assert_eq!(
            serde_json::to_value(&menu).unwrap(),
            json!({
                "day": "Montag",
                "date": "14. April",
                "Local": {
                    "title": "Spaghetti Bolognese",
                    "description": "Hausgemacht",
                    "price": {"intern": 7.4, "extern": 12.4},
                    "origin": "Fleisch: Rind; Schweiz",
                    "dietaryType": "meat"
                }
            })
        );
    }

    #[test]
    fn test_missing_day_serializes_as_null() {
        let selection = MenuSelection::Day(None);
        assert_eq!(serde_json::to_string(&selection).unwrap(), "null");
    }
}
