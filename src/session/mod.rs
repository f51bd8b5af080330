pub mod identifier_session;
pub mod shared;
