//! Disaster-tweet classifier: vocabulary and padding pipeline, an
//! embedding + attention + bidirectional GRU model on Burn, training,
//! evaluation and submission generation.

#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
