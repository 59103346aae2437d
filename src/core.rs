pub mod actor;
pub mod dispatch;
