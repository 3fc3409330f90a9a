//! Client for the remote vision prediction service.
//!
//! The service accepts either raw image bytes or an image URL and returns
//! tagged, probability-scored bounding boxes. This crate wraps that HTTP
//! contract behind the [`Predictor`] trait so the classification logic can be
//! exercised against a mock provider in tests.

pub mod client;
pub mod config;
pub mod error;

pub use client::{Predictor, VisionClient};
pub use config::VisionConfig;
pub use error::{VisionError, VisionResult};
