use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

// =========================================================
// Cyclical categories
// =========================================================

/// A fixed, finite category derived from a timestamp.
///
/// The `Ord` implementation is the display order.
pub trait CyclicalCategory: Copy + Ord + Serialize + 'static {
    /// Every category, in display order.
    const DOMAIN: &'static [Self];

    fn of(t: DateTime<Utc>) -> Self;
}

/// Meteorological season of the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl CyclicalCategory for Season {
    const DOMAIN: &'static [Self] = &[Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    fn of(t: DateTime<Utc>) -> Self {
        Season::from_month(t.month())
    }
}

/// Working days versus weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekType {
    Weekdays,
    Weekend,
}

impl WeekType {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => WeekType::Weekend,
            _ => WeekType::Weekdays,
        }
    }
}

impl CyclicalCategory for WeekType {
    const DOMAIN: &'static [Self] = &[WeekType::Weekdays, WeekType::Weekend];

    fn of(t: DateTime<Utc>) -> Self {
        WeekType::from_weekday(t.weekday())
    }
}

/// Mean value of the rows falling in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclicalBucket<C> {
    pub category: C,
    pub average_value: f64,
    pub count: usize,
}

pub const GET_SEASONAL_PROFILE: &str = "get_seasonal_profile";
pub const GET_WEEKLY_PROFILE: &str = "get_weekly_profile";
