pub mod generator;
pub mod identity_model;
pub mod sanitize;
