pub mod commands;
pub mod data;
pub mod engine;
pub mod errors;
pub mod indicators;
pub mod models;
pub mod param_utils;
pub mod performance;
pub mod registry;
pub mod runner;
pub mod strategy;

#[cfg(test)]
pub mod testutil;
