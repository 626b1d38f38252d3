//! Integration Tests Module
//!
//! End-to-end tests of the explanation pipeline and the CLI surfaces.

pub mod cli_output;
pub mod explain_pipeline;
