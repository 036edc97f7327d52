pub mod dashboard;
pub mod dispatch;
pub mod profile;
pub mod session;
pub mod shared;
pub mod suspicious;
pub mod transactions;
