use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{CategoryScore, Dish, Entry};

/// Terse entry construction for unit tests.
pub(crate) struct EntryFixture {
    entry: Entry,
}

pub(crate) fn entry(restaurant: &str) -> EntryFixture {
    EntryFixture {
        entry: Entry {
            entry_id: Uuid::new_v4(),
            restaurant_name: restaurant.to_string(),
            city: "Lyon".to_string(),
            cost: None,
            quantity: None,
            eaten_at: at(2024, 1, 15),
            cuisine: None,
            subtype: None,
            composite_score: None,
            dishes: vec![Dish {
                name: "House special".to_string(),
                rating: None,
            }],
            ratings: Vec::new(),
        },
    }
}

pub(crate) fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(19, 30, 0))
        .unwrap()
}

/// Parses a decimal literal such as "4.25".
pub(crate) fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

impl EntryFixture {
    pub(crate) fn city(mut self, city: &str) -> Self {
        self.entry.city = city.to_string();
        self
    }

    pub(crate) fn score(mut self, score: &str) -> Self {
        self.entry.composite_score = Some(dec(score));
        self
    }

    pub(crate) fn cost(mut self, cost: &str) -> Self {
        self.entry.cost = Some(dec(cost));
        self
    }

    pub(crate) fn eaten(mut self, year: i32, month: u32, day: u32) -> Self {
        self.entry.eaten_at = at(year, month, day);
        self
    }

    pub(crate) fn subtype(mut self, subtype: &str) -> Self {
        self.entry.subtype = Some(subtype.to_string());
        self
    }

    pub(crate) fn cuisine(mut self, cuisine: &str) -> Self {
        self.entry.cuisine = Some(cuisine.to_string());
        self
    }

    pub(crate) fn ratings(mut self, ratings: Vec<CategoryScore>) -> Self {
        self.entry.ratings = ratings;
        self
    }

    pub(crate) fn build(self) -> Entry {
        self.entry
    }
}
