//! Integration tests for habit streaks and category aggregation.

use chrono::{Duration, NaiveDate};
use trackitall_core::stats::{recurring_monthly_total, CategoryShare};
use trackitall_core::{
    month_window, week_window, AttendanceStatus, AttendanceSummary, CategoryAggregator,
    CategoryRecord, Frequency, GamificationError, RecurringExpense, StreakTracker,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

#[test]
fn test_week_of_habits_then_a_gap() {
    let mut tracker = StreakTracker::new();
    for n in 0..7 {
        tracker.toggle(today() - Duration::days(n));
    }
    let summary = tracker.evaluate(today(), 30).unwrap();
    assert_eq!(summary.current_streak, 7);
    assert_eq!(summary.best_streak, 7);

    tracker.toggle(today() - Duration::days(3));
    let summary = tracker.evaluate(today(), 30).unwrap();
    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.best_streak, 7);
    assert_eq!(summary.total_completions, 6);
    assert_eq!(summary.completion_rate, 20);
}

#[test]
fn test_best_streak_survives_any_toggle_sequence() {
    let mut tracker = StreakTracker::new();
    let mut best_seen = 0;
    // Pseudo-random but deterministic walk over the last two weeks
    for step in 0..200u32 {
        let offset = i64::from((step * 7 + 3) % 14);
        tracker.toggle(today() - Duration::days(offset));
        let summary = tracker.evaluate(today(), 30).unwrap();
        assert!(summary.best_streak >= best_seen);
        assert!(summary.best_streak >= summary.current_streak);
        best_seen = summary.best_streak;
    }
}

#[test]
fn test_monthly_expense_breakdown() {
    let raw = r#"[
        {"date": "2024-06-02", "category": "Food", "amount": 240},
        {"date": "2024-06-11T18:45:00.000Z", "category": "Transport", "amount": 60},
        {"date": 1718236800000, "category": "Food", "amount": 60},
        {"date": {"seconds": 1718928000, "nanoseconds": 0}, "category": "Books", "amount": 300},
        {"date": "2024-05-31", "category": "Food", "amount": 1000},
        {"date": "", "category": "Food", "amount": 1000}
    ]"#;
    let records: Vec<CategoryRecord> = serde_json::from_str(raw).unwrap();
    let agg = CategoryAggregator::new();
    let june = month_window(today());

    let totals = agg.totals_in(&records, june);
    assert_eq!(totals["Food"], 300.0);
    assert_eq!(totals["Transport"], 60.0);
    assert_eq!(totals["Books"], 300.0);

    let shares = agg.percentage_share(&totals);
    assert_eq!(shares["Food"], 45);
    assert_eq!(shares["Transport"], 9);
    assert_eq!(shares["Books"], 45);

    let rows: Vec<CategoryShare> = agg.breakdown(&totals);
    assert_eq!(rows.last().map(|r| r.category.as_str()), Some("Transport"));

    let total = agg.window_total(&records, june);
    assert_eq!(total, 660.0);
    assert_eq!(agg.daily_average(total, june.len_days()), Ok(22.0));
    assert_eq!(
        agg.daily_average(total, 0),
        Err(GamificationError::InvalidPeriod { days: 0 })
    );
}

#[test]
fn test_reference_window_excludes_end_day() {
    let records = vec![
        CategoryRecord::new("2024-01-05", "Food", 100.0),
        CategoryRecord::new("2024-02-01", "Food", 50.0),
    ];
    let totals = CategoryAggregator::new().totals_by_category(
        &records,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    );
    assert_eq!(totals.into_iter().collect::<Vec<_>>(), vec![("Food".to_string(), 100.0)]);
}

#[test]
fn test_weekly_time_entries() {
    let records = vec![
        CategoryRecord::new("2024-06-17", "Study", 90.0),
        CategoryRecord::new("2024-06-19", "Exercise", 30.0),
        CategoryRecord::new("2024-06-23", "Study", 30.0),
        CategoryRecord::new("2024-06-24", "Study", 500.0),
    ];
    let totals = CategoryAggregator::new().totals_in(&records, week_window(today()));
    assert_eq!(totals["Study"], 120.0);
    assert_eq!(totals["Exercise"], 30.0);
}

#[test]
fn test_attendance_and_recurring_helpers() {
    let marks = [true, true, true, false, true, true, true, true, false, true];
    let summary = AttendanceSummary::from_marks(marks);
    assert_eq!(summary.percentage, 80);
    assert_eq!(summary.status(), AttendanceStatus::Good);
    assert_eq!(summary.lectures_needed(90), Some(10));

    let subscriptions = vec![
        RecurringExpense {
            name: "Music".into(),
            category: Some("Entertainment".into()),
            amount: 119.0,
            frequency: Frequency::Monthly,
        },
        RecurringExpense {
            name: "Bus pass".into(),
            category: Some("Transport".into()),
            amount: 150.0,
            frequency: Frequency::Weekly,
        },
    ];
    assert_eq!(recurring_monthly_total(&subscriptions), 719.0);
}
