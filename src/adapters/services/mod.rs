//! External service adapters
//!
//! This module contains adapters for external APIs:
//! - LLM (Large Language Model) completion services

pub mod llm;
