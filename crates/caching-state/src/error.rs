//! Error types for the caching-state crate
//!
//! These cover untrusted input only: category names, serialized reports and
//! cache settings. Building a disabled state without a reason is a defect in
//! the caller and panics instead of surfacing here.

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use crate::DisabledReasonCategory;
use miette::Diagnostic;
use thiserror::Error;

/// Error type for caching-state operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A category name did not match any known category
    #[error("Unknown caching disabled reason category: '{value}'")]
    #[diagnostic(
        code(cuenv::caching_state::unknown_category),
        help("Use one of the snake_case category names, e.g. 'build_cache_disabled'")
    )]
    UnknownCategory {
        /// The unrecognized input
        value: String,
    },

    /// A disabled reason was supplied without a description
    #[error("Disabled reason for category '{category}' has an empty description")]
    #[diagnostic(
        code(cuenv::caching_state::empty_description),
        help("Every disabled reason must explain why caching was not applied")
    )]
    EmptyDescription {
        /// Category of the rejected reason
        category: DisabledReasonCategory,
    },

    /// A serialized caching state contradicts itself
    #[error("Inconsistent caching state: {message}")]
    #[diagnostic(
        code(cuenv::caching_state::inconsistent_state),
        help("An enabled state carries no reason; a disabled state carries both category and description")
    )]
    InconsistentState {
        /// What was wrong with the input
        message: String,
    },

    /// A cache setting had a value that could not be interpreted
    #[error("Invalid value '{value}' for cache setting {key}")]
    #[diagnostic(
        code(cuenv::caching_state::invalid_setting),
        help("Expected one of: true, false, 1, 0, yes, no, on, off")
    )]
    InvalidSetting {
        /// Name of the setting or environment variable
        key: String,
        /// The rejected value
        value: String,
    },

    /// Cache settings could not be parsed
    #[error("Failed to parse cache settings: {message}")]
    #[diagnostic(code(cuenv::caching_state::parse))]
    Parse {
        /// Error message from the parser
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(code(cuenv::caching_state::serialization))]
    Serialization {
        /// Error message describing the serialization issue
        message: String,
    },
}

impl Error {
    /// Create an unknown category error
    #[must_use]
    pub fn unknown_category(value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            value: value.into(),
        }
    }

    /// Create an inconsistent state error
    #[must_use]
    pub fn inconsistent_state(msg: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: msg.into(),
        }
    }

    /// Create an invalid setting error
    #[must_use]
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }
}

/// Result type for caching-state operations
pub type Result<T> = std::result::Result<T, Error>;
