// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Services module - session, API and workflow layer.

pub mod api;
pub mod auth;
pub mod feeds;
pub mod requests;
pub mod schedule;
pub mod selection;
pub mod session;

pub use api::{ApiClient, Auth, Envelope};
pub use auth::{AuthState, Navigation, SessionController};
pub use feeds::{Feed, FeedScreen, FeedState};
pub use requests::RequestWorkflow;
pub use schedule::build_weekly_schedule;
pub use selection::{PreselectionWorkflow, WorkflowPhase};
pub use session::SessionContext;
