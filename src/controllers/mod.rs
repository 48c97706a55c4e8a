//! Page controllers
//!
//! One controller per route. Each is a single-owner state machine driven by
//! `&mut self` actions; actions return a [`Navigation`] telling the caller
//! whether to stay or move to another view.
//!
//! Admin controllers (`CampaignDashboardController`, `AnalyticsController`)
//! run the session guard on entry and read the token again for every call.

mod analytics;
mod dashboard;
mod landing;
mod login;
mod preview;

pub use analytics::{
    AnalyticsController, DETAIL_LOAD_FAILED, DetailRequest, DetailState, LIST_LOAD_FAILED,
    ListState,
};
pub use dashboard::{
    CREATE_FIELDS_REQUIRED, CampaignDashboardController, CampaignForm, UPDATE_FIELDS_REQUIRED,
};
pub use landing::{CAMPAIGN_NOT_FOUND, LandingController, LandingState, LandingView, MISSING_SLUG};
pub use login::{INVALID_CREDENTIALS, LoginController};
pub use preview::{PreviewRegistry, PreviewUrl};

pub use crate::router::{Navigation, Route};
