pub mod api;
pub mod notify;
pub mod streak;
