//! Core library for glabtools
//!
//! This crate implements the **Functional Core** of the glabtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The glabtools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`glabtools_core`** (this crate): Pure transformation and validation functions with zero I/O
//! - **`glabtools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions in this crate are deterministic and free of side effects: role
//! mapping, input validation, target classification, record projection, and
//! outcome construction know nothing about HTTP, the environment, or the clock.
//! Anything time-dependent (the upper bound of the valid year range) is passed
//! in by the shell, which reads the clock at call time.
//!
//! # Module Organization
//!
//! - [`gitlab`]: Domain models and transformations for the GitLab API
//! - [`outcome`]: The structured success/error shape returned to callers
//!
//! Each module carries its own unit tests using fixture data, no mocking
//! required.

pub mod gitlab;
pub mod outcome;
