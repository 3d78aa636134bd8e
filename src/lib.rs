// src/lib.rs

//! Hacker News front-page crawler library

#[cfg(feature = "lambda")]
pub mod lambda;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
