// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Data models shared by the API client and workflows.

pub mod course;
pub mod feed;
pub mod request;
pub mod schedule;
pub mod user;

pub use course::{CatalogItem, ScheduledCourse, SelectionItem};
pub use feed::{filter_news, DebtItem, EventItem, ItemId, NewsItem, TaskItem, VideoItem};
pub use request::{NewRequest, RequestKind, RequestRecord};
pub use schedule::WeeklySchedule;
pub use user::{
    Credentials, LoginData, PasswordChange, PasswordReset, Registration, Session, UserProfile,
};
