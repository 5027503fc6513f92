use ecow::EcoString;
use thiserror::Error;

use crate::analyzer::TypeError;
use crate::api::{Diagnostic, Severity};
use crate::parser::Span;
use crate::{ToString, Vec, format, vec};

/// Failure of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RewriteError {
    /// A node's type could not be computed before any rule ran.
    #[error(transparent)]
    TypeResolution(#[from] TypeError),

    /// A node's type could not be computed during or right after a rule's
    /// pass, typically because of a node the rule produced.
    #[error("rewrite rule '{rule}' left an ill-typed tree: {error}")]
    RuleResolution { rule: EcoString, error: TypeError },

    /// A rule broke the patching contract.
    #[error("rewrite rule '{rule}' {reason}")]
    PatchViolation {
        rule: EcoString,
        span: Option<Span>,
        reason: Violation,
    },
}

/// The ways a rule can break the patching contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("patched the same node twice in one visit")]
    DoublePatch,
    #[error("kept patching the same node after {limit} revisits")]
    RevisitLimit { limit: u32 },
}

impl RewriteError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            RewriteError::TypeResolution(err) => err.span.as_ref(),
            RewriteError::RuleResolution { error, .. } => error.span.as_ref(),
            RewriteError::PatchViolation { span, .. } => span.as_ref(),
        }
    }

    /// Fill in `fallback` when the error has no location of its own.
    pub(crate) fn or_span(mut self, fallback: Option<&Span>) -> Self {
        let slot = match &mut self {
            RewriteError::TypeResolution(err) => &mut err.span,
            RewriteError::RuleResolution { error, .. } => &mut error.span,
            RewriteError::PatchViolation { span, .. } => span,
        };
        if slot.is_none() {
            *slot = fallback.cloned();
        }
        self
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RewriteError::TypeResolution(err) => err.to_diagnostic(),
            RewriteError::RuleResolution { rule, error } => {
                let mut diagnostic = error.to_diagnostic();
                diagnostic.message = format!("{} (after rewrite rule '{}')", diagnostic.message, rule);
                diagnostic
                    .help
                    .push(format!("Rewrite rule '{}' must only produce well-typed nodes", rule));
                diagnostic
            }
            RewriteError::PatchViolation { reason, .. } => {
                let (code, help) = match reason {
                    Violation::DoublePatch => (
                        "R001",
                        "A rule may replace the visited node at most once per visit",
                    ),
                    Violation::RevisitLimit { .. } => (
                        "R002",
                        "The rule must stop matching the nodes it produces",
                    ),
                };
                Diagnostic {
                    severity: Severity::Error,
                    message: self.to_string(),
                    span: self.span().cloned().unwrap_or(Span(0..0)),
                    related: Vec::new(),
                    help: vec![help.to_string()],
                    code: Some(code.to_string()),
                }
            }
        }
    }
}
