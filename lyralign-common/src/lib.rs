//! # lyralign Common Library
//!
//! Shared code for the lyralign workspace:
//! - Alignment data model (TranscriptWord, AlignedLine)
//! - LRC timestamp rendering
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod lrc;
pub mod model;

pub use error::{Error, Result};
pub use model::{AlignedLine, AlignmentResult, TranscriptWord};
