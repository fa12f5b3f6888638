//! PagerDuty API service implementations.

mod abilities;
mod addons;
mod automation_actions_runners;
mod escalation_policies;
mod schedules;
mod service;
mod teams;
mod users;
mod vendors;

pub use abilities::*;
pub use addons::*;
pub use automation_actions_runners::*;
pub use escalation_policies::*;
pub use schedules::*;
pub use service::*;
pub use teams::*;
pub use users::*;
pub use vendors::*;
