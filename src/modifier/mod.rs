pub mod modifier_model;
pub mod resolver;
