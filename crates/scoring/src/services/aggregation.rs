use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use crate::dto::analytics::{
    BreakdownSlice, CostRatingPoint, LeaderboardEntry, MonthlyActivity, MonthlySpend,
    SummaryStats,
};
use crate::dto::dashboard::Dashboard;
use crate::models::Entry;
use crate::services::behavior::behavioral_metrics;
use crate::services::numeric::round_half_away;

pub const LEADERBOARD_SIZE: usize = 8;

/// Visits a restaurant needs before it counts as a proven favorite.
pub const REPEAT_VISIT_THRESHOLD: usize = 2;

pub const NO_SUBTYPE_LABEL: &str = "No order specified";
pub const NO_CUISINE_LABEL: &str = "Unclassified";

const MONTH_LABEL_FORMAT: &str = "%b %Y";

pub fn summary_stats(entries: &[Entry]) -> SummaryStats {
    let restaurants: HashSet<&str> = entries.iter().map(|e| e.restaurant_name.as_str()).collect();
    let cities: HashSet<&str> = entries.iter().map(|e| e.city.as_str()).collect();

    SummaryStats {
        total_entries: entries.len(),
        total_spent: entries.iter().filter_map(|e| e.cost).sum(),
        unique_restaurants: restaurants.len(),
        unique_cities: cities.len(),
    }
}

pub fn top_restaurants(entries: &[Entry]) -> Vec<LeaderboardEntry> {
    top_restaurants_limited(entries, LEADERBOARD_SIZE)
}

/// Restaurants ranked by average composite score.
///
/// Unscored entries are ignored, so a restaurant with no scored visit never
/// shows up. When any restaurant reaches [`REPEAT_VISIT_THRESHOLD`] visits,
/// only such restaurants are ranked. Equal averages are ordered by name.
pub fn top_restaurants_limited(entries: &[Entry], limit: usize) -> Vec<LeaderboardEntry> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for entry in entries {
        if let Some(score) = entry.composite_score {
            let group = groups
                .entry(entry.restaurant_name.as_str())
                .or_insert((Decimal::ZERO, 0));
            group.0 += score;
            group.1 += 1;
        }
    }

    let has_repeat_visits = groups
        .values()
        .any(|(_, count)| *count >= REPEAT_VISIT_THRESHOLD);

    let mut board: Vec<LeaderboardEntry> = groups
        .into_iter()
        .filter(|(_, (_, count))| !has_repeat_visits || *count >= REPEAT_VISIT_THRESHOLD)
        .map(|(name, (total, count))| LeaderboardEntry {
            restaurant_name: name.to_string(),
            average_score: round_half_away(total / Decimal::from(count), 1),
            visit_count: count,
        })
        .collect();

    board.sort_by(|a, b| {
        b.average_score
            .cmp(&a.average_score)
            .then_with(|| a.restaurant_name.cmp(&b.restaurant_name))
    });
    board.truncate(limit);

    debug!(
        "Leaderboard built with {} restaurant(s), repeat-visit gate {}",
        board.len(),
        if has_repeat_visits { "on" } else { "off" }
    );

    board
}

/// Entries per calendar month, oldest first. Months without entries are not
/// filled in.
pub fn monthly_activity(entries: &[Entry]) -> Vec<MonthlyActivity> {
    let mut buckets: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for entry in entries {
        let key = (entry.eaten_at.year(), entry.eaten_at.month());
        buckets
            .entry(key)
            .or_insert_with(|| (entry.eaten_at.format(MONTH_LABEL_FORMAT).to_string(), 0))
            .1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (label, entry_count))| MonthlyActivity {
            year,
            month,
            label,
            entry_count,
        })
        .collect()
}

/// Spend per calendar month, oldest first. Entries without a cost are left
/// out, so a month with no costed entry has no point.
pub fn monthly_spend(entries: &[Entry]) -> Vec<MonthlySpend> {
    let mut buckets: BTreeMap<(i32, u32), (String, Decimal)> = BTreeMap::new();
    for entry in entries {
        let Some(cost) = entry.cost else {
            continue;
        };
        let key = (entry.eaten_at.year(), entry.eaten_at.month());
        buckets
            .entry(key)
            .or_insert_with(|| {
                (
                    entry.eaten_at.format(MONTH_LABEL_FORMAT).to_string(),
                    Decimal::ZERO,
                )
            })
            .1 += cost;
    }

    buckets
        .into_iter()
        .map(|((year, month), (label, total))| MonthlySpend {
            year,
            month,
            label,
            total_spent: round_half_away(total, 2),
        })
        .collect()
}

/// Counts per label, most common first and ties by label. Missing or blank
/// labels are counted under `default_label`.
pub fn breakdown_by<F>(entries: &[Entry], label_of: F, default_label: &str) -> Vec<BreakdownSlice>
where
    F: Fn(&Entry) -> Option<&str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let label = label_of(entry)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(default_label);
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut slices: Vec<BreakdownSlice> = counts
        .into_iter()
        .map(|(label, count)| BreakdownSlice {
            label: label.to_string(),
            count,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    slices
}

pub fn subtype_breakdown(entries: &[Entry]) -> Vec<BreakdownSlice> {
    breakdown_by(entries, |e| e.subtype.as_deref(), NO_SUBTYPE_LABEL)
}

pub fn cuisine_breakdown(entries: &[Entry]) -> Vec<BreakdownSlice> {
    breakdown_by(entries, |e| e.cuisine.as_deref(), NO_CUISINE_LABEL)
}

/// Cost against composite score for every entry that has both.
pub fn cost_vs_rating(entries: &[Entry]) -> Vec<CostRatingPoint> {
    entries
        .iter()
        .filter_map(|entry| match (entry.cost, entry.composite_score) {
            (Some(cost), Some(rating)) => Some(CostRatingPoint {
                cost,
                rating,
                label: entry.restaurant_name.clone(),
            }),
            _ => None,
        })
        .collect()
}

pub fn build_dashboard(entries: &[Entry]) -> Dashboard {
    debug!("Building dashboard over {} entries", entries.len());

    Dashboard {
        summary: summary_stats(entries),
        top_restaurants: top_restaurants(entries),
        monthly_activity: monthly_activity(entries),
        monthly_spend: monthly_spend(entries),
        subtype_breakdown: subtype_breakdown(entries),
        cuisine_breakdown: cuisine_breakdown(entries),
        cost_vs_rating: cost_vs_rating(entries),
        behavior: behavioral_metrics(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, entry};

    fn names(board: &[LeaderboardEntry]) -> Vec<&str> {
        board.iter().map(|e| e.restaurant_name.as_str()).collect()
    }

    #[test]
    fn test_summary_stats() {
        let entries = vec![
            entry("Chez Paul").cost("24.50").build(),
            entry("Chez Paul").city("Paris").build(),
            entry("Le Nord").cost("10.25").city("Paris").build(),
        ];

        let stats = summary_stats(&entries);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_spent, dec("34.75"));
        assert_eq!(stats.unique_restaurants, 2);
        assert_eq!(stats.unique_cities, 2);
    }

    #[test]
    fn test_summary_stats_empty() {
        let stats = summary_stats(&[]);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_spent, Decimal::ZERO);
        assert_eq!(stats.unique_restaurants, 0);
        assert_eq!(stats.unique_cities, 0);
    }

    #[test]
    fn test_repeat_visit_gate_keeps_only_favorites() {
        let entries = vec![
            entry("Regular").score("3.0").build(),
            entry("Regular").score("4.0").build(),
            entry("One Off A").score("5.0").build(),
            entry("One Off B").score("4.8").build(),
            entry("One Off C").score("4.9").build(),
        ];

        let board = top_restaurants(&entries);
        assert_eq!(names(&board), vec!["Regular"]);
        assert_eq!(board[0].average_score, dec("3.5"));
        assert_eq!(board[0].visit_count, 2);
    }

    #[test]
    fn test_without_repeat_visits_everything_is_ranked() {
        let entries = vec![
            entry("Middle").score("3.5").build(),
            entry("Top").score("4.75").build(),
            entry("Bottom").score("2.0").build(),
        ];

        let board = top_restaurants(&entries);
        assert_eq!(names(&board), vec!["Top", "Middle", "Bottom"]);
        assert_eq!(board[0].average_score, dec("4.8"));
    }

    #[test]
    fn test_unscored_restaurants_are_excluded() {
        let entries = vec![
            entry("Scored").score("4.0").build(),
            entry("Never Scored").build(),
            entry("Never Scored").build(),
        ];

        let board = top_restaurants(&entries);
        assert_eq!(names(&board), vec!["Scored"]);
    }

    #[test]
    fn test_unscored_visits_do_not_count_toward_gate() {
        let entries = vec![
            entry("Half Scored").score("4.0").build(),
            entry("Half Scored").build(),
            entry("Other").score("3.0").build(),
        ];

        let board = top_restaurants(&entries);
        assert_eq!(names(&board), vec!["Half Scored", "Other"]);
        assert_eq!(board[0].visit_count, 1);
    }

    #[test]
    fn test_equal_averages_ordered_by_name() {
        let entries = vec![
            entry("Zinc").score("4.0").build(),
            entry("Alpha").score("4.0").build(),
            entry("Mango").score("4.0").build(),
        ];

        assert_eq!(names(&top_restaurants(&entries)), vec!["Alpha", "Mango", "Zinc"]);
    }

    #[test]
    fn test_leaderboard_truncates_to_eight() {
        let entries: Vec<_> = (0..12)
            .map(|i| entry(&format!("Spot {:02}", i)).score(&format!("{}.0", i % 5)).build())
            .collect();

        let board = top_restaurants(&entries);
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        assert_eq!(board[0].average_score, dec("4.0"));
    }

    #[test]
    fn test_leaderboard_empty() {
        assert!(top_restaurants(&[]).is_empty());
    }

    #[test]
    fn test_monthly_activity_sorted_without_gaps_filled() {
        let entries = vec![
            entry("A").eaten(2024, 3, 2).build(),
            entry("B").eaten(2023, 12, 31).build(),
            entry("C").eaten(2024, 3, 28).build(),
            entry("D").eaten(2024, 1, 1).build(),
        ];

        let activity = monthly_activity(&entries);
        let labels: Vec<_> = activity.iter().map(|p| p.label.as_str()).collect();
        let counts: Vec<_> = activity.iter().map(|p| p.entry_count).collect();
        assert_eq!(labels, vec!["Dec 2023", "Jan 2024", "Mar 2024"]);
        assert_eq!(counts, vec![1, 1, 2]);
        assert_eq!((activity[2].year, activity[2].month), (2024, 3));
    }

    #[test]
    fn test_monthly_spend_ignores_missing_costs() {
        let entries = vec![
            entry("A").eaten(2024, 5, 1).cost("12.345").build(),
            entry("B").eaten(2024, 5, 9).cost("7.10").build(),
            entry("C").eaten(2024, 5, 20).build(),
            entry("D").eaten(2024, 6, 3).build(),
        ];

        let spend = monthly_spend(&entries);
        assert_eq!(spend.len(), 1);
        assert_eq!(spend[0].label, "May 2024");
        assert_eq!(spend[0].total_spent, dec("19.45"));
    }

    #[test]
    fn test_subtype_breakdown() {
        let entries = vec![
            entry("A").subtype("Spicy").build(),
            entry("B").build(),
            entry("C").subtype("Spicy").build(),
            entry("D").subtype("Mild").build(),
            entry("E").subtype("  ").build(),
        ];

        let breakdown = subtype_breakdown(&entries);
        assert_eq!(
            breakdown,
            vec![
                BreakdownSlice {
                    label: NO_SUBTYPE_LABEL.to_string(),
                    count: 2
                },
                BreakdownSlice {
                    label: "Spicy".to_string(),
                    count: 2
                },
                BreakdownSlice {
                    label: "Mild".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_cuisine_breakdown_default_label() {
        let entries = vec![entry("A").cuisine("Thai").build(), entry("B").build()];
        let breakdown = cuisine_breakdown(&entries);
        let labels: Vec<_> = breakdown.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Thai", NO_CUISINE_LABEL]);
    }

    #[test]
    fn test_cost_vs_rating_requires_both_values() {
        let entries = vec![
            entry("Both").cost("20").score("4.5").build(),
            entry("Cost Only").cost("15").build(),
            entry("Score Only").score("3.0").build(),
        ];

        let points = cost_vs_rating(&entries);
        assert_eq!(
            points,
            vec![CostRatingPoint {
                cost: dec("20"),
                rating: dec("4.5"),
                label: "Both".to_string(),
            }]
        );
    }

    #[test]
    fn test_dashboard_on_empty_collection() {
        let dashboard = build_dashboard(&[]);
        assert_eq!(dashboard.summary.total_entries, 0);
        assert!(dashboard.top_restaurants.is_empty());
        assert!(dashboard.monthly_activity.is_empty());
        assert!(dashboard.monthly_spend.is_empty());
        assert!(dashboard.subtype_breakdown.is_empty());
        assert!(dashboard.cost_vs_rating.is_empty());
        assert_eq!(dashboard.behavior.adventurousness, Decimal::ZERO);
        assert_eq!(dashboard.behavior.diverse_palate, None);
    }
}
