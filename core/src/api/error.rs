//! Public error types for the graft API.
//!
//! This module defines the stable error types exposed to library users.
//! Internal errors are converted to these public types at API boundaries,
//! where the source text is attached so that diagnostics can be rendered.

use crate::parser::Span;
use crate::{String, Vec, format, vec};

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

/// Public error type for all graft operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid API usage (e.g., wrong argument count for a host call).
    Api(String),

    /// Compilation errors (parse errors, type errors, rewrite rule violations).
    ///
    /// Contains one or more diagnostics with source locations and context.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// Runtime errors during evaluation (e.g., division by zero).
    Runtime {
        diagnostic: Diagnostic,
        source: String,
    },

    /// Resource limits exceeded (e.g., stack overflow).
    ResourceExceeded(String),
}

impl Error {
    /// Attach the source text that the diagnostics point into.
    pub(crate) fn with_source(mut self, text: &str) -> Self {
        match &mut self {
            Error::Compilation { source, .. } | Error::Runtime { source, .. } => {
                *source = String::from(text);
            }
            Error::Api(_) | Error::ResourceExceeded(_) => {}
        }
        self
    }

    /// All diagnostics carried by this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics, .. } => diagnostics,
            Error::Runtime { diagnostic, .. } => core::slice::from_ref(diagnostic),
            Error::Api(_) | Error::ResourceExceeded(_) => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Api(msg) => write!(f, "API error: {}", msg),
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)?;
                for diagnostic in diagnostics {
                    write!(f, "\n  {}: {}", diagnostic.severity, diagnostic.message)?;
                }
                Ok(())
            }
            Error::Runtime { diagnostic, .. } => {
                write!(f, "Runtime error: {}", diagnostic.message)
            }
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Help texts suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "E001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "rule applied here").
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<crate::parser::ParseError> for Error {
    fn from(err: crate::parser::ParseError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: String::new(),
        }
    }
}

impl From<crate::analyzer::TypeError> for Error {
    fn from(err: crate::analyzer::TypeError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: String::new(),
        }
    }
}

impl From<crate::visitor::RewriteError> for Error {
    fn from(err: crate::visitor::RewriteError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: String::new(),
        }
    }
}

impl From<crate::evaluator::ExecutionError> for Error {
    fn from(err: crate::evaluator::ExecutionError) -> Self {
        use crate::evaluator::ExecutionErrorKind::*;
        match err.kind {
            ResourceExceeded(res_err) => Error::ResourceExceeded(format!("{}", res_err)),
            Runtime(runtime_err) => Error::Runtime {
                diagnostic: Diagnostic {
                    severity: Severity::Error,
                    message: format!("{}", runtime_err),
                    span: err.span.unwrap_or(Span(0..0)),
                    related: Vec::new(),
                    help: Vec::new(),
                    code: None,
                },
                source: String::new(),
            },
        }
    }
}
