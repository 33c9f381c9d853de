//! lyralign library interface
//!
//! Exposes the alignment engine, track services, and workflow for
//! integration testing and embedding. The `lyralign` binary is a thin CLI
//! over [`workflow::TrackProcessor`].

pub mod engine;
pub mod services;
pub mod text;
pub mod workflow;

pub use workflow::{AlignmentReport, TrackProcessor, WorkflowError};
