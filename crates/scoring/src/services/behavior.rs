use std::collections::{HashMap, HashSet};

use rust_decimal::{Decimal, MathematicalOps};

use crate::dto::behavior::BehavioralMetrics;
use crate::models::Entry;
use crate::services::numeric::{clamp, round_half_away};

/// Upper bound of every trait.
pub const TRAIT_MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Score standard deviation that maps to full discernment. Empirically tuned;
/// a typical spread of opinions lands near the top of the scale.
pub const DISCERNMENT_SPREAD_CEILING: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Fewer scored entries than this give no measurable spread.
pub const MIN_SCORED_FOR_DISCERNMENT: usize = 2;

pub fn behavioral_metrics(entries: &[Entry]) -> BehavioralMetrics {
    BehavioralMetrics {
        adventurousness: adventurousness(entries),
        diverse_palate: diverse_palate(entries),
        discernment: discernment(entries),
        loyalty: loyalty(entries),
    }
}

/// Distinct restaurants per entry, scaled to 0-5.
pub fn adventurousness(entries: &[Entry]) -> Decimal {
    let restaurants: HashSet<&str> = entries.iter().map(|e| e.restaurant_name.as_str()).collect();
    ratio_trait(restaurants.len(), entries.len())
}

/// Distinct subtypes per entry that has one, scaled to 0-5.
///
/// `None` when no entry records a subtype, which is different from a low
/// score.
pub fn diverse_palate(entries: &[Entry]) -> Option<Decimal> {
    let subtypes: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.subtype.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if subtypes.is_empty() {
        return None;
    }

    let distinct: HashSet<&str> = subtypes.iter().copied().collect();
    Some(ratio_trait(distinct.len(), subtypes.len()))
}

/// Population standard deviation of composite scores against
/// [`DISCERNMENT_SPREAD_CEILING`], scaled to 0-5.
pub fn discernment(entries: &[Entry]) -> Decimal {
    let scores: Vec<Decimal> = entries.iter().filter_map(|e| e.composite_score).collect();
    if scores.len() < MIN_SCORED_FOR_DISCERNMENT {
        return Decimal::ZERO;
    }

    let n = Decimal::from(scores.len());
    let mean = scores.iter().copied().sum::<Decimal>() / n;
    let variance = scores
        .iter()
        .map(|score| {
            let delta = *score - mean;
            delta * delta
        })
        .sum::<Decimal>()
        / n;
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

    let spread = (std_dev / DISCERNMENT_SPREAD_CEILING).min(Decimal::ONE);
    finish_trait(spread * TRAIT_MAX)
}

/// Visits to the most visited restaurant per entry, scaled to 0-5.
pub fn loyalty(entries: &[Entry]) -> Decimal {
    let mut visits: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *visits.entry(entry.restaurant_name.as_str()).or_insert(0) += 1;
    }

    let most_visits = visits.values().copied().max().unwrap_or(0);
    ratio_trait(most_visits, entries.len())
}

fn ratio_trait(numerator: usize, denominator: usize) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }

    finish_trait(Decimal::from(numerator) / Decimal::from(denominator) * TRAIT_MAX)
}

fn finish_trait(value: Decimal) -> Decimal {
    round_half_away(clamp(value, Decimal::ZERO, TRAIT_MAX), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, entry};

    #[test]
    fn test_empty_collection() {
        let metrics = behavioral_metrics(&[]);
        assert_eq!(metrics.adventurousness, Decimal::ZERO);
        assert_eq!(metrics.diverse_palate, None);
        assert_eq!(metrics.discernment, Decimal::ZERO);
        assert_eq!(metrics.loyalty, Decimal::ZERO);
    }

    #[test]
    fn test_all_distinct_restaurants_is_fully_adventurous() {
        let entries = vec![entry("A").build(), entry("B").build(), entry("C").build()];
        assert_eq!(adventurousness(&entries), dec("5.0"));
    }

    #[test]
    fn test_single_restaurant_is_fully_loyal() {
        let entries = vec![entry("Usual").build(), entry("Usual").build(), entry("Usual").build()];
        assert_eq!(loyalty(&entries), dec("5.0"));
        assert_eq!(adventurousness(&entries), dec("1.7"));
    }

    #[test]
    fn test_mixed_visits() {
        let entries = vec![entry("A").build(), entry("A").build(), entry("B").build()];
        assert_eq!(adventurousness(&entries), dec("3.3"));
        assert_eq!(loyalty(&entries), dec("3.3"));
    }

    #[test]
    fn test_single_scored_entry_has_no_discernment() {
        let entries = vec![entry("A").score("4.5").build(), entry("B").build()];
        assert_eq!(discernment(&entries), Decimal::ZERO);
    }

    #[test]
    fn test_identical_scores_have_no_discernment() {
        let entries = vec![
            entry("A").score("3.5").build(),
            entry("B").score("3.5").build(),
            entry("C").score("3.5").build(),
        ];
        assert_eq!(discernment(&entries), Decimal::ZERO);
    }

    #[test]
    fn test_discernment_scales_with_spread() {
        // std dev 0.6 -> 0.6 / 1.2 * 5
        let entries = vec![entry("A").score("3.0").build(), entry("B").score("4.2").build()];
        assert_eq!(discernment(&entries), dec("2.5"));
    }

    #[test]
    fn test_discernment_is_capped() {
        // std dev 2.0 is past the ceiling
        let entries = vec![entry("A").score("1.0").build(), entry("B").score("5.0").build()];
        assert_eq!(discernment(&entries), dec("5.0"));
    }

    #[test]
    fn test_diverse_palate_ignores_entries_without_subtype() {
        let entries = vec![
            entry("A").subtype("Spicy").build(),
            entry("A").subtype("Spicy").build(),
            entry("A").subtype("Mild").build(),
            entry("A").build(),
        ];
        assert_eq!(diverse_palate(&entries), Some(dec("3.3")));
    }

    #[test]
    fn test_diverse_palate_not_applicable_without_subtypes() {
        let entries = vec![entry("A").build(), entry("B").subtype(" ").build()];
        assert_eq!(diverse_palate(&entries), None);
    }

    #[test]
    fn test_traits_stay_within_bounds() {
        let entries = vec![
            entry("A").score("0.5").subtype("x").build(),
            entry("B").score("5.0").subtype("y").build(),
            entry("C").score("2.75").subtype("z").build(),
        ];
        let metrics = behavioral_metrics(&entries);
        let max = dec("5");
        for value in [
            metrics.adventurousness,
            metrics.discernment,
            metrics.loyalty,
            metrics.diverse_palate.unwrap(),
        ] {
            assert!(value >= Decimal::ZERO && value <= max);
        }
    }
}
