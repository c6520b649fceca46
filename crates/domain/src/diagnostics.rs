//! Structured diagnostics
//!
//! Terraform reports problems as a list of `{severity, summary, detail}`
//! records. Client operations return [`Result`](crate::Result); this module
//! projects those results into the diagnostics shape the resource layer hands
//! back to Terraform.

use serde::{Deserialize, Serialize};

use crate::errors::IncapsulaError;

/// Severity of a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

crate::impl_wire_enum_conversions!(DiagnosticSeverity {
    Error => "error",
    Warning => "warning",
});

/// One structured diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { severity: DiagnosticSeverity::Error, summary: summary.into(), detail: detail.into() }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl From<&IncapsulaError> for Diagnostic {
    fn from(err: &IncapsulaError) -> Self {
        let summary = match err.context() {
            Some(context) => format!("Failure {context}"),
            None => match err {
                IncapsulaError::Config(_) => "Invalid provider configuration".to_string(),
                _ => "Invalid resource arguments".to_string(),
            },
        };
        Self::error(summary, err.to_string())
    }
}

impl From<IncapsulaError> for Diagnostic {
    fn from(err: IncapsulaError) -> Self {
        Self::from(&err)
    }
}

/// Ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::warning(summary, detail));
    }

    /// True when at least one diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }

    /// Split a client result into its value and the diagnostics describing
    /// any failure.
    pub fn from_result<T>(result: crate::Result<T>) -> (Option<T>, Self) {
        match result {
            Ok(value) => (Some(value), Self::new()),
            Err(err) => (None, Self::from(err)),
        }
    }

    /// Append the diagnostics of `result` and return its value, if any.
    pub fn absorb<T>(&mut self, result: crate::Result<T>) -> Option<T> {
        let (value, diags) = Self::from_result(result);
        self.extend(diags);
        value
    }
}

impl From<IncapsulaError> for Diagnostics {
    fn from(err: IncapsulaError) -> Self {
        Self(vec![Diagnostic::from(&err)])
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RequestContext;

    #[test]
    fn error_diagnostic_names_operation_and_keeps_full_message() {
        let err = IncapsulaError::Status {
            context: RequestContext::new("reading site status", "site 42"),
            status: 401,
            body: "unauthorized".into(),
        };

        let diag = Diagnostic::from(&err);
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.summary, "Failure reading site status for site 42");
        assert!(diag.detail.contains("401"));
        assert!(diag.detail.contains("unauthorized"));
    }

    #[test]
    fn from_result_splits_success_and_failure() {
        let (value, diags) = Diagnostics::from_result(Ok::<_, IncapsulaError>(3));
        assert_eq!(value, Some(3));
        assert!(diags.is_empty());

        let (value, diags) =
            Diagnostics::from_result::<u8>(Err(IncapsulaError::InvalidInput("mask".into())));
        assert!(value.is_none());
        assert!(diags.has_errors());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn warnings_alone_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.warning("DNS not configured", "point www to the CNAME");
        assert!(!diags.has_errors());

        let value = diags.absorb::<()>(Err(IncapsulaError::Config("no api key".into())));
        assert!(value.is_none());
        assert!(diags.has_errors());
        assert_eq!(diags.iter().count(), 2);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("WARNING".parse::<DiagnosticSeverity>(), Ok(DiagnosticSeverity::Warning));
        assert_eq!(DiagnosticSeverity::Error.to_string(), "error");
    }
}
