//! FILENAME: core/report-engine/src/statistics.rs
//! PURPOSE: Descriptive statistics over flat lists of grades.
//! CONTEXT: Pure functions, no I/O. Results are rounded to 2 decimals at
//! the end of each function; inputs are the unrounded averages. Empty input
//! is a valid state (a class with no students) and yields 0 or an empty list.

use std::cmp::Ordering;

use averaging::StudentId;

use crate::view::{GradeRangeBucket, RankedStudent};

/// Rounds to 2 decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn raw_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn mean(values: &[f64]) -> f64 {
    round2(raw_mean(values))
}

/// Middle value, or the mean of the two middle values for an even count.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    };
    round2(median)
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).map_or(0.0, round2)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).map_or(0.0, round2)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = raw_mean(values);
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / values.len() as f64;
    round2(variance.sqrt())
}

/// Counts values per range. Ranges are `[min, max)` except the last, which
/// is `[min, max]`, so a grade of exactly 10 lands in the top bucket.
///
/// A value is counted in the first range that contains it and in no bucket
/// when no range does. Percentages are relative to `values.len()`.
pub fn distribute(values: &[f64], ranges: &[(f64, f64)]) -> Vec<GradeRangeBucket> {
    let mut counts = vec![0usize; ranges.len()];
    let last = ranges.len().saturating_sub(1);

    for &value in values {
        let bucket = ranges.iter().enumerate().position(|(i, &(min, max))| {
            if i == last {
                value >= min && value <= max
            } else {
                value >= min && value < max
            }
        });
        if let Some(index) = bucket {
            counts[index] += 1;
        }
    }

    let total = values.len();
    ranges
        .iter()
        .zip(counts)
        .map(|(&(min, max), count)| GradeRangeBucket {
            min,
            max,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// The `count` highest values, ranked 1-based. Ties keep their input order.
/// NaN ranks below every number.
pub fn rank_top(values: &[(StudentId, f64)], count: usize) -> Vec<RankedStudent> {
    let mut sorted: Vec<&(StudentId, f64)> = values.iter().collect();
    // Stable sort: equal averages stay in input order
    sorted.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    });

    sorted
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(index, &(student_id, average))| RankedStudent {
            student_id,
            rank: index + 1,
            average: round2(average),
        })
        .collect()
}

/// Percentage of values at or above `pass_mark`.
pub fn approval_rate(values: &[f64], pass_mark: f64) -> f64 {
    let approved = values.iter().filter(|&&v| v >= pass_mark).count();
    percentage(approved, values.len())
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_RANGES: [(f64, f64); 4] = [(0.0, 4.0), (4.0, 6.0), (6.0, 8.0), (8.0, 10.0)];

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(7.125), 7.13);
        assert_eq!(round2(-7.125), -7.13);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(8.0), 8.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[8.0, 7.0]), 7.5);
        assert_eq!(mean(&[10.0, 9.0, 9.0]), 9.33);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[8.0, 7.0, 9.0, 6.0]), 7.5);
        assert_eq!(median(&[8.0, 7.0, 9.0]), 8.0);
        assert_eq!(median(&[4.2]), 4.2);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_min_max() {
        let values = [6.456, 9.999, 3.0];
        assert_eq!(min(&values), 3.0);
        assert_eq!(max(&values), 10.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_is_population() {
        // Mean 5, squared deviations 9 + 1 + 1 + 9 = 20, / 4 = 5
        assert_eq!(std_dev(&[2.0, 4.0, 6.0, 8.0]), round2(5.0_f64.sqrt()));
        assert_eq!(std_dev(&[7.0, 7.0]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn test_distribute_boundaries() {
        let buckets = distribute(&[3.9, 4.0, 5.9, 10.0], &DEFAULT_RANGES);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 0, 1]);

        let percentages: Vec<f64> = buckets.iter().map(|b| b.percentage).collect();
        assert_eq!(percentages, vec![25.0, 50.0, 0.0, 25.0]);

        assert_eq!(buckets[3].min, 8.0);
        assert_eq!(buckets[3].max, 10.0);
    }

    #[test]
    fn test_distribute_counts_each_value_once() {
        let values = [0.0, 4.0, 6.0, 8.0, 10.0, 5.99, 7.5];
        let buckets = distribute(&values, &DEFAULT_RANGES);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
    }

    #[test]
    fn test_distribute_skips_values_outside_all_ranges() {
        let buckets = distribute(&[-1.0, 5.0, 10.5], &DEFAULT_RANGES);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 0]);
        // Still relative to all three values
        assert_eq!(buckets[1].percentage, 33.33);
    }

    #[test]
    fn test_distribute_empty_input() {
        let buckets = distribute(&[], &DEFAULT_RANGES);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.count == 0 && b.percentage == 0.0));
        assert!(distribute(&[5.0], &[]).is_empty());
    }

    #[test]
    fn test_rank_top_orders_and_truncates() {
        let values = [(1, 6.0), (2, 9.5), (3, 7.25), (4, 8.0)];
        let top = rank_top(&values, 3);
        let ids: Vec<StudentId> = top.iter().map(|r| r.student_id).collect();
        let ranks: Vec<usize> = top.iter().map(|r| r.rank).collect();
        assert_eq!(ids, vec![2, 4, 3]);
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_top_ties_keep_input_order() {
        let values = [(7, 8.0), (3, 9.0), (5, 8.0), (1, 8.0)];
        let ids: Vec<StudentId> = rank_top(&values, 10).iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![3, 7, 5, 1]);
    }

    #[test]
    fn test_rank_top_uses_unrounded_values() {
        // Both display as 8.33 but 8.334 ranks first
        let values = [(1, 8.331), (2, 8.334)];
        let top = rank_top(&values, 2);
        assert_eq!(top[0].student_id, 2);
        assert_eq!(top[0].average, 8.33);
        assert_eq!(top[1].average, 8.33);
        assert!(rank_top(&[], 10).is_empty());
    }

    #[test]
    fn test_rank_top_puts_nan_last() {
        let mut values: Vec<(StudentId, f64)> =
            (1..=40).map(|id| (id, (id % 11) as f64)).collect();
        values[5].1 = f64::NAN;
        values[30].1 = f64::NAN;

        let top = rank_top(&values, 40);
        assert_eq!(top.len(), 40);
        assert_eq!(top[0].average, 10.0);
        let tail: Vec<StudentId> = top[38..].iter().map(|r| r.student_id).collect();
        assert_eq!(tail, vec![6, 31]);
        assert!(top[..38].iter().all(|r| !r.average.is_nan()));
    }

    #[test]
    fn test_approval_rate() {
        assert_eq!(approval_rate(&[5.0, 4.9, 6.0], 5.0), 66.67);
        assert_eq!(approval_rate(&[5.0, 6.0], 5.0), 100.0);
        assert_eq!(approval_rate(&[], 5.0), 0.0);
    }
}
