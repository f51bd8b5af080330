pub mod debug_log;
pub mod sink;
pub mod test_code;
