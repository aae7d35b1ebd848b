//! Statistics module for TrackItAll
//!
//! Aggregations over the raw records the dashboard collects: category totals
//! for expenses and time entries, attendance summaries, goal progress and
//! recurring expense normalization.

mod attendance;
mod category;
mod goals;
mod recurring;

pub use attendance::{AttendanceStatus, AttendanceSummary};

pub use category::{CategoryAggregator, CategoryRecord, CategoryShare, CategoryTotals};

pub use goals::goal_progress;

pub use recurring::{
    recurring_monthly_total, recurring_yearly_total, Frequency, RecurringExpense,
};
