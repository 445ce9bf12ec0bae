use crate::classify::classify;
use crate::error::MenuError;
use crate::model::{DayMenu, MenuSelection, MenuSet};
use crate::normalize::normalize;
use crate::profile::{self, RestaurantProfile};
use crate::segment::day_blocks;
use crate::split::split_block;
use crate::weekday::Weekday;

/// Extracts every day of `text` using `profile`. Days without any dish are
/// left out.
pub fn extract_week(text: &str, profile: &RestaurantProfile) -> MenuSet {
    let menus: MenuSet = day_blocks(text)
        .into_iter()
        .filter_map(|block| {
            let split = split_block(block.text, profile.price_marker);
            let dishes: Vec<_> = classify(split, profile)
                .iter()
                .filter_map(normalize)
                .collect();
            if dishes.is_empty() {
                tracing::debug!(restaurant = profile.id, day = %block.weekday, "no dishes, skipping day");
                return None;
            }
            Some(DayMenu {
                day: block.weekday,
                date: block.date,
                dishes,
            })
        })
        .collect();

    tracing::debug!(restaurant = profile.id, days = menus.len(), "extracted menus");
    menus
}

/// First menu of `day` in the set, if the document has one.
pub fn select_day(menus: &[DayMenu], day: Weekday) -> Option<&DayMenu> {
    menus.iter().find(|menu| menu.day == day)
}

/// Entry point used by the service: extracts the menus of `text` for the
/// restaurant `restaurant_id`, optionally narrowed down to one weekday.
pub fn extract_menus(
    text: &str,
    restaurant_id: &str,
    day: Option<Weekday>,
) -> Result<MenuSelection, MenuError> {
    let profile = profile::lookup(restaurant_id)?;
    let menus = extract_week(text, profile);
    Ok(match day {
        None => MenuSelection::Week(menus),
        Some(day) => MenuSelection::Day(select_day(&menus, day).cloned()),
    })
}
