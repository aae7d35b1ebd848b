//! Course attendance summaries.

use serde::{Deserialize, Serialize};

use crate::storage::AttendanceConfig;

/// Attendance band shown next to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// 90% and above
    Excellent,
    /// 80% to 89%
    Good,
    /// 75% to 79%
    Warning,
    /// Below 75%
    Critical,
}

impl AttendanceStatus {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => AttendanceStatus::Excellent,
            80..=89 => AttendanceStatus::Good,
            75..=79 => AttendanceStatus::Warning,
            _ => AttendanceStatus::Critical,
        }
    }
}

/// Attended/total lecture counts for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub attended: u32,
    pub total: u32,
    /// Rounded percentage; 0 when there are no lectures yet
    pub percentage: u32,
}

impl AttendanceSummary {
    pub fn new(attended: u32, total: u32) -> Self {
        let attended = attended.min(total);
        let denominator = total.max(1);
        let percentage = (f64::from(attended) / f64::from(denominator) * 100.0).round() as u32;
        Self {
            attended,
            total,
            percentage,
        }
    }

    /// Summarize one mark per lecture (`true` = attended).
    pub fn from_marks<I: IntoIterator<Item = bool>>(marks: I) -> Self {
        let (attended, total) = marks
            .into_iter()
            .fold((0u32, 0u32), |(attended, total), present| {
                (attended + u32::from(present), total + 1)
            });
        Self::new(attended, total)
    }

    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::from_percentage(self.percentage)
    }

    /// Consecutive lectures that must be attended to reach `target` percent.
    ///
    /// `Some(0)` if the target is already met; `None` if it can never be met
    /// (a target of 100% after a missed lecture).
    pub fn lectures_needed(&self, target: u32) -> Option<u32> {
        let target = u64::from(target.min(100));
        let attended = u64::from(self.attended);
        let total = u64::from(self.total);
        if attended * 100 >= target * total {
            return Some(0);
        }
        if target == 100 {
            return None;
        }
        // (attended + x) / (total + x) >= target / 100
        let deficit = target * total - attended * 100;
        let per_lecture = 100 - target;
        Some(deficit.div_ceil(per_lecture) as u32)
    }

    /// [`lectures_needed`](Self::lectures_needed) against the configured target.
    pub fn lectures_to_target(&self, config: &AttendanceConfig) -> Option<u32> {
        self.lectures_needed(config.target_percentage)
    }
}
