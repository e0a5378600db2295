//! Mock implementations and test utilities for the task service
//!
//! This crate provides shared testing infrastructure:
//! - An in-memory `TaskRepository` with error injection
//! - Builders and fixtures for task data
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - A contract suite every repository implementation must pass

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::MockTaskRepository;
