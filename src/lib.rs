//! PR Reviewer - Pull request reviewer assignment service
//!
//! Assigns reviewers to pull requests from the author's team, manages the
//! open -> merged lifecycle and reviewer substitution, and reports
//! assignment load statistics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
