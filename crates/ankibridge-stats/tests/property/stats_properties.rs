use ankibridge_stats::coerce::{ArrayBounds, LenientOptions, array_param, parse_json_leniently};
use ankibridge_stats::stats::{
    BucketConfig, DailyCount, calculate_streak_from, compute_distribution, compute_retention,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use serde_json::json;

fn boundaries() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 1..8).prop_map(|mut bounds| {
        bounds.sort_by(f64::total_cmp);
        bounds.dedup();
        bounds
    })
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

proptest! {
    #[test]
    fn buckets_account_for_every_value(
        sample in prop::collection::vec(-2000.0f64..2000.0, 0..200),
        bounds in boundaries(),
    ) {
        let config = BucketConfig::new(bounds.clone()).unwrap();
        let metrics = compute_distribution(&sample, &config);

        prop_assert_eq!(metrics.count, sample.len());
        prop_assert_eq!(metrics.buckets.total(), sample.len());
        prop_assert!(metrics.buckets.len() <= bounds.len() + 1);
    }

    #[test]
    fn summary_statistics_are_ordered(
        sample in prop::collection::vec(-1e6f64..1e6, 1..200),
    ) {
        let config = BucketConfig::new(vec![0.0]).unwrap();
        let metrics = compute_distribution(&sample, &config);
        let tolerance = 1e-6 * metrics.max.abs().max(metrics.min.abs()).max(1.0);

        prop_assert!(metrics.min <= metrics.median);
        prop_assert!(metrics.median <= metrics.max);
        prop_assert!(metrics.mean >= metrics.min - tolerance);
        prop_assert!(metrics.mean <= metrics.max + tolerance);
    }

    #[test]
    fn retention_is_a_fraction(ratings in prop::collection::vec(-3i64..8, 0..300)) {
        let metrics = compute_retention(&ratings);
        let valid = ratings.iter().filter(|r| (1..=4).contains(*r)).count();

        prop_assert!((0.0..=1.0).contains(&metrics.overall));
        prop_assert_eq!(metrics.by_rating.total(), valid);
        prop_assert!(metrics.by_rating.passed() <= valid);
    }

    #[test]
    fn streak_never_exceeds_active_days(
        days in prop::collection::vec((0i64..60, 0u64..5), 0..90),
    ) {
        let today = base_date();
        let series: Vec<DailyCount> = days
            .iter()
            .map(|&(offset, count)| DailyCount::new(today - Duration::days(offset), count))
            .collect();

        let mut active: Vec<NaiveDate> = series
            .iter()
            .filter(|day| day.count > 0)
            .map(|day| day.date)
            .collect();
        active.sort();
        active.dedup();

        prop_assert!(calculate_streak_from(&series, today) as usize <= active.len());
    }

    #[test]
    fn contiguous_run_is_full_streak(len in 1usize..120, shuffle_seed in any::<u64>()) {
        let today = base_date();
        let mut series: Vec<DailyCount> = (0..len)
            .map(|offset| DailyCount::new(today - Duration::days(offset as i64), 1))
            .collect();
        let len_u64 = series.len() as u64;
        series.rotate_left((shuffle_seed % len_u64) as usize);

        prop_assert_eq!(calculate_streak_from(&series, today) as usize, len);
    }

    #[test]
    fn encoded_arrays_resolve_like_native(ids in prop::collection::vec(any::<i64>(), 0..20)) {
        let native: Vec<i64> = array_param(json!(ids), "ids", ArrayBounds::UNBOUNDED).unwrap();
        let encoded = serde_json::to_string(&ids).unwrap();
        let from_string: Vec<i64> = array_param(json!(encoded), "ids", ArrayBounds::UNBOUNDED).unwrap();

        prop_assert_eq!(native, from_string);
    }

    #[test]
    fn lenient_parser_never_panics(text in ".{0,200}") {
        let _ = parse_json_leniently(&text, &LenientOptions::default());
    }
}
