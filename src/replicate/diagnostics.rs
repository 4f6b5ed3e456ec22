use std::fmt;

/// Record of one value (or nested slot) the copier had to degrade to
/// absence. Indexed by the value's position in the batch, counted from the
/// bottom of the copied range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDiagnostic {
    pub index: usize,
    pub detail: String,
}

impl CopyDiagnostic {
    pub fn new(index: usize, detail: impl Into<String>) -> Self {
        Self {
            index,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CopyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value #{}: {}", self.index, self.detail)
    }
}

/// Outcome of one top-level replication call.
///
/// `pushed` always equals the requested batch size when the call returns
/// `Ok`; degraded values still occupy their stack slot as absence.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub pushed: usize,
    pub diagnostics: Vec<CopyDiagnostic>,
}

impl CopyReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = CopyDiagnostic::new(3, "cannot copy Coroutine value");
        assert_eq!(diag.to_string(), "value #3: cannot copy Coroutine value");
    }

    #[test]
    fn test_report_cleanliness() {
        let mut report = CopyReport::default();
        assert!(report.is_clean());
        report.diagnostics.push(CopyDiagnostic::new(0, "x"));
        assert!(!report.is_clean());
    }
}
