pub mod auth_service;
pub mod notifications;
pub mod remote_list;

pub use auth_service::{AuthService, LoginOutcome, SignupOutcome};
pub use notifications::{Notice, NoticeLevel, Notifications};
pub use remote_list::{AfterWrite, Endpoint, LoadState, RemoteList, Resource};
