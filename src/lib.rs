pub mod activities;
pub mod ai;
pub mod app;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod favorites;
pub mod food_log;
pub mod foods;
pub mod profile;
pub mod ranking;
pub mod response;
pub mod state;
pub mod summary;
pub mod water;

#[cfg(test)]
mod test_support;
