// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Weekly schedule grouped into Monday..Sunday buckets.

use crate::models::course::ScheduledCourse;
use crate::time_utils::spanish_weekday_label;
use chrono::Weekday;

/// Seven fixed day buckets, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<ScheduledCourse>; 7],
}

impl WeeklySchedule {
    pub fn push(&mut self, day: Weekday, course: ScheduledCourse) {
        self.days[day.num_days_from_monday() as usize].push(course);
    }

    pub fn day(&self, day: Weekday) -> &[ScheduledCourse] {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Look up a bucket by its display label ("Lunes", "Martes", ...).
    pub fn by_label(&self, label: &str) -> Option<&[ScheduledCourse]> {
        self.iter()
            .find(|(day, _)| spanish_weekday_label(*day).eq_ignore_ascii_case(label))
            .map(|(_, courses)| courses)
    }

    /// All buckets in week order, empty days included.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[ScheduledCourse])> {
        let mut day = Weekday::Mon;
        self.days.iter().map(move |courses| {
            let current = day;
            day = day.succ();
            (current, courses.as_slice())
        })
    }

    pub fn total(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
