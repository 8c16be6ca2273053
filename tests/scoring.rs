#[cfg(test)]
mod tests {
    use aimtrack::libs::scoring::{round2, Period, ScoreAggregator, ScoreEntry, ScoreError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history(scores: &[i64], on: NaiveDate) -> Vec<ScoreEntry> {
        scores.iter().map(|&s| ScoreEntry::new(s, on)).collect()
    }

    #[test]
    fn test_first_session_on_empty_history() {
        let today = date(2024, 3, 4);
        let stats = ScoreAggregator::default().record_session(&[], &[10, 20, 15], 1.2, today).unwrap();

        assert_eq!(stats.highscore, 20);
        assert_eq!(stats.rolling_average_10, 15.0);
        assert_eq!(stats.threshold, 19.0);
        assert!(stats.threshold_achieved);
        assert_eq!(stats.sensitivity, 1.2);
        assert_eq!(stats.history, history(&[10, 20, 15], today));
    }

    #[test]
    fn test_rolling_average_uses_most_recent_entries() {
        let earlier = date(2024, 3, 1);
        let prior = history(&(5..=16).collect::<Vec<_>>(), earlier);

        let stats = ScoreAggregator::default()
            .record_session(&prior, &[3], 0.5, date(2024, 3, 4))
            .unwrap();

        // last 10: 8..=16 and 3
        assert_eq!(stats.rolling_average_10, 11.1);
        assert_eq!(stats.highscore, 16);
        assert_eq!(stats.threshold, 15.2);
        assert!(!stats.threshold_achieved);
        assert_eq!(stats.history.len(), 13);
    }

    #[test]
    fn test_old_outlier_leaves_rolling_window() {
        let mut prior = history(&[10_000], date(2024, 3, 1));
        prior.extend(history(&[20, 22, 18, 25, 21, 19, 23, 20, 24], date(2024, 3, 2)));

        let stats = ScoreAggregator::default()
            .record_session(&prior, &[28], 0.5, date(2024, 3, 4))
            .unwrap();

        // last 10 are the nine small scores plus 28
        assert_eq!(stats.rolling_average_10, 22.0);
        assert_eq!(stats.highscore, 10_000);
        assert_eq!(stats.threshold, 9500.0);
        assert!(!stats.threshold_achieved);
    }

    #[test]
    fn test_extreme_scores_do_not_overflow() {
        let today = date(2024, 3, 4);
        let stats = ScoreAggregator::default()
            .record_session(&[], &[i64::MAX, 1], 1.0, today)
            .unwrap();

        let expected = 2f64.powi(62);
        assert_eq!(stats.highscore, i64::MAX);
        assert!((stats.rolling_average_10 - expected).abs() / expected < 1e-9);

        let period = ScoreAggregator::average_for_period(&stats.history, Period::Day, today).unwrap();
        assert_eq!(period.count, 2);
        assert!((period.average - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_highscore_is_max_of_history_and_session() {
        let prior = history(&[40, 55, 48], date(2024, 2, 1));
        let aggregator = ScoreAggregator::default();

        let lower = aggregator.record_session(&prior, &[30, 41], 1.0, date(2024, 2, 2)).unwrap();
        assert_eq!(lower.highscore, 55);

        let higher = aggregator.record_session(&prior, &[60], 1.0, date(2024, 2, 2)).unwrap();
        assert_eq!(higher.highscore, 60);
        assert_eq!(higher.threshold, 57.0);
        assert!(higher.threshold_achieved);
    }

    #[test]
    fn test_threshold_follows_configured_ratio() {
        let aggregator = ScoreAggregator::new(0.9).unwrap();
        let stats = aggregator.record_session(&[], &[87, 101], 0.8, date(2024, 1, 1)).unwrap();

        assert_eq!(stats.threshold, round2(0.9 * 101.0));
        assert_eq!(stats.threshold_ratio, 0.9);
    }

    #[test]
    fn test_threshold_uses_session_best_not_last() {
        let prior = history(&[100], date(2024, 1, 1));
        let stats = ScoreAggregator::default()
            .record_session(&prior, &[96, 50], 1.0, date(2024, 1, 2))
            .unwrap();

        assert_eq!(stats.threshold, 95.0);
        assert!(stats.threshold_achieved);
    }

    #[test]
    fn test_empty_scores_rejected() {
        let result = ScoreAggregator::default().record_session(&[], &[], 1.0, date(2024, 1, 1));
        assert!(matches!(result, Err(ScoreError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_or_nan_sensitivity_rejected() {
        let aggregator = ScoreAggregator::default();
        assert!(matches!(
            aggregator.record_session(&[], &[10], -0.1, date(2024, 1, 1)),
            Err(ScoreError::InvalidInput(_))
        ));
        assert!(matches!(
            aggregator.record_session(&[], &[10], f64::NAN, date(2024, 1, 1)),
            Err(ScoreError::InvalidInput(_))
        ));
        assert!(aggregator.record_session(&[], &[10], 0.0, date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_prior_history_is_preserved_in_order() {
        let prior = vec![
            ScoreEntry::new(12, date(2024, 1, 1)),
            ScoreEntry::new(14, date(2024, 1, 3)),
        ];
        let stats = ScoreAggregator::default()
            .record_session(&prior, &[13, 11], 1.0, date(2024, 1, 5))
            .unwrap();

        assert_eq!(&stats.history[..2], &prior[..]);
        assert_eq!(stats.history[2], ScoreEntry::new(13, date(2024, 1, 5)));
        assert_eq!(stats.history[3], ScoreEntry::new(11, date(2024, 1, 5)));
    }

    #[test]
    fn test_period_average_windows() {
        // Thursday 2024-05-16
        let today = date(2024, 5, 16);
        let entries = vec![
            ScoreEntry::new(10, date(2023, 12, 31)),
            ScoreEntry::new(20, date(2024, 1, 10)),
            ScoreEntry::new(30, date(2024, 5, 2)),
            ScoreEntry::new(40, date(2024, 5, 12)), // Sunday before the week
            ScoreEntry::new(50, date(2024, 5, 13)), // Monday
            ScoreEntry::new(60, date(2024, 5, 16)),
        ];

        let day = ScoreAggregator::average_for_period(&entries, Period::Day, today).unwrap();
        assert_eq!((day.average, day.count), (60.0, 1));

        let week = ScoreAggregator::average_for_period(&entries, Period::Week, today).unwrap();
        assert_eq!((week.average, week.count), (55.0, 2));

        let month = ScoreAggregator::average_for_period(&entries, Period::Month, today).unwrap();
        assert_eq!((month.average, month.count), (45.0, 4));

        let year = ScoreAggregator::average_for_period(&entries, Period::Year, today).unwrap();
        assert_eq!((year.average, year.count), (40.0, 5));

        let all = ScoreAggregator::average_for_period(&entries, Period::All, today).unwrap();
        assert_eq!((all.average, all.count), (35.0, 6));
    }

    #[test]
    fn test_period_average_no_data() {
        let today = date(2024, 5, 16);
        let entries = history(&[10, 20], date(2024, 5, 1));

        assert_eq!(ScoreAggregator::average_for_period(&entries, Period::Day, today), None);
        assert_eq!(ScoreAggregator::average_for_period(&[], Period::All, today), None);
    }

    #[test]
    fn test_period_average_excludes_future_entries() {
        let today = date(2024, 5, 16);
        let entries = vec![
            ScoreEntry::new(10, date(2024, 5, 16)),
            ScoreEntry::new(90, date(2024, 5, 17)),
        ];

        let all = ScoreAggregator::average_for_period(&entries, Period::All, today).unwrap();
        assert_eq!((all.average, all.count), (10.0, 1));
    }

    #[test]
    fn test_period_average_is_idempotent() {
        let today = date(2024, 5, 16);
        let entries = history(&[7, 8, 9], today);

        let first = ScoreAggregator::average_for_period(&entries, Period::Week, today);
        let second = ScoreAggregator::average_for_period(&entries, Period::Week, today);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().average, 8.0);
    }

    #[test]
    fn test_period_average_rounds_to_two_places() {
        let today = date(2024, 5, 16);
        let entries = history(&[1, 1, 2], today);

        let day = ScoreAggregator::average_for_period(&entries, Period::Day, today).unwrap();
        assert_eq!(day.average, 1.33);
    }
}
