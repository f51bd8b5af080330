pub mod config_model;
pub mod store;
