//! Per-unit bootstrap reporting

use serde::{Deserialize, Serialize};

/// Result of provisioning a whole manifest
///
/// One outcome per manifest unit, in manifest order. A unit failure is
/// recorded here rather than aborting the run, so callers always see the
/// fate of every unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Outcomes in manifest order
    pub outcomes: Vec<UnitOutcome>,

    /// Total submission time in milliseconds
    pub duration_ms: u64,
}

impl BootstrapReport {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn add_success(&mut self, stack_name: String, template: String, stack_id: String) {
        self.outcomes.push(UnitOutcome {
            stack_name,
            template,
            success: true,
            stack_id: Some(stack_id),
            error: None,
        });
    }

    pub fn add_failure(&mut self, stack_name: String, template: String, error: String) {
        self.outcomes.push(UnitOutcome {
            stack_name,
            template,
            success: false,
            stack_id: None,
            error: Some(error),
        });
    }
}

impl Default for BootstrapReport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} provisioned, {} failed",
            self.succeeded(),
            self.failed()
        )
    }
}

/// Outcome of one provisioning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitOutcome {
    /// Synthesized stack name
    pub stack_name: String,

    /// Template reference from the manifest unit
    pub template: String,

    /// Whether the orchestration service acknowledged the request
    pub success: bool,

    /// Provider-side stack identifier, when acknowledged
    pub stack_id: Option<String>,

    /// Error message, when the request failed
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = BootstrapReport::new();
        assert!(report.is_success());

        report.add_success(
            "vaultdrop-0".to_string(),
            "stack.yaml".to_string(),
            "arn:aws:cloudformation:eu-west-1:123:stack/vaultdrop-0/abc".to_string(),
        );
        report.add_failure(
            "vaultdrop-1".to_string(),
            "other.yaml".to_string(),
            "AlreadyExistsException".to_string(),
        );

        assert!(!report.is_success());
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.to_string(), "1 provisioned, 1 failed");
    }
}
