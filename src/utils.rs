pub mod config;
pub mod errors;
pub mod twosum_utils;
