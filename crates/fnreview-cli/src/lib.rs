//! CLI library components for function extraction and review.

pub mod logging;
pub mod pipeline;
