//! 存储层

mod config;

pub use config::ConfigStorage;
