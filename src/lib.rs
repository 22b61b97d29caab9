#![doc = include_str!("RUSTDOC.md")]

pub mod account;
pub mod app;
pub mod database;
pub mod listings;
pub mod loader;
pub mod logger;
pub mod platform;

#[cfg(test)]
pub mod test_support;
