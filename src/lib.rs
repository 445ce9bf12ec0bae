pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod scrape;
pub mod segment;
pub mod split;
pub mod store;
pub mod update;
pub mod weekday;

pub use error::{AppError, MenuError};
pub use model::{DayMenu, DietaryType, DishRecord, MenuSelection, MenuSet, Price, PricePair};
pub use pipeline::{extract_menus, extract_week, select_day};
pub use profile::RestaurantProfile;
pub use weekday::{DayFilter, Weekday};
