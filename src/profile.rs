use crate::error::MenuError;
use crate::split::PriceMarker;

/// Static description of one restaurant's menu PDF.
#[derive(Debug)]
pub struct RestaurantProfile {
    pub id: &'static str,
    pub name: &'static str,
    /// Menu lines in the order their slots appear in a day block.
    pub categories: &'static [&'static str],
    /// Index of the category that is left out on days it isn't offered,
    /// without any marker in the PDF.
    pub omittable: Option<usize>,
    pub price_marker: PriceMarker,
    /// Pattern matched against `href`s on the menu page.
    pub link_pattern: &'static str,
}

impl RestaurantProfile {
    pub fn is_omittable(&self, category_index: usize) -> bool {
        self.omittable == Some(category_index)
    }
}

static PROFILES: [RestaurantProfile; 2] = [
    RestaurantProfile {
        id: "htp",
        name: "SIX HTP",
        categories: &["Local", "Vegi", "Globetrotter", "Buffet"],
        omittable: Some(2),
        price_marker: PriceMarker::InternExtern,
        link_pattern: r"/media/[a-zA-Z0-9]+/.*menueplan.+htp.+pdf$",
    },
    RestaurantProfile {
        id: "ht201",
        name: "SIX HT201",
        categories: &["Local", "Global", "Vegi", "Pizza & Pasta"],
        omittable: Some(2),
        price_marker: PriceMarker::InternExtern,
        link_pattern: r"/media/[a-zA-Z0-9]+/.*menueplan.+ht201.+pdf$",
    },
];

pub fn all() -> &'static [RestaurantProfile] {
    &PROFILES
}

/// Looks up a profile by id, ignoring case. There is no default profile:
/// a wrong category list would corrupt every dish of the run.
pub fn lookup(id: &str) -> Result<&'static RestaurantProfile, MenuError> {
    PROFILES
        .iter()
        .find(|profile| profile.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| MenuError::UnknownRestaurant(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_profiles() {
        let htp = lookup("htp").unwrap();
        assert_eq!(htp.categories, ["Local", "Vegi", "Globetrotter", "Buffet"]);
        assert!(htp.is_omittable(2));

        let ht201 = lookup("HT201").unwrap();
        assert_eq!(ht201.categories[3], "Pizza & Pasta");
    }

    #[test]
    fn test_lookup_unknown_fails() {
        let err = lookup("mensa").unwrap_err();
        assert!(matches!(err, MenuError::UnknownRestaurant(ref id) if id == "mensa"));
        assert_eq!(err.to_string(), "unknown restaurant: mensa");
    }

    #[test]
    fn test_link_patterns_compile() {
        for profile in all() {
            assert!(regex::Regex::new(profile.link_pattern).is_ok(), "{}", profile.id);
            assert!(profile.omittable.is_none_or(|i| i < profile.categories.len()));
        }
    }
}
