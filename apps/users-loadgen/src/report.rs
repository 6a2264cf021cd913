use crate::scenario::Scenario;
use std::collections::BTreeMap;
use std::fmt;

/// Result of one request: an HTTP status, or a transport error message
pub type Outcome = (Scenario, Result<u16, String>);

/// Counts gathered over a run
#[derive(Debug, Default)]
pub struct Report {
    pub by_status: BTreeMap<u16, usize>,
    pub by_scenario: BTreeMap<(Scenario, u16), usize>,
    pub transport_errors: usize,
    /// Responses outside [`Scenario::expected_statuses`]
    pub unexpected: usize,
}

impl Report {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let mut report = Report::default();
        for (scenario, result) in outcomes {
            match result {
                Ok(status) => {
                    *report.by_status.entry(status).or_default() += 1;
                    *report.by_scenario.entry((scenario, status)).or_default() += 1;
                    if !scenario.expected_statuses().contains(&status) {
                        report.unexpected += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(scenario = scenario.name(), error = %e, "Request failed");
                    report.transport_errors += 1;
                }
            }
        }
        report
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status histogram:")?;
        for (status, count) in &self.by_status {
            writeln!(f, "  {:>3}  {}", status, count)?;
        }
        writeln!(f, "per scenario:")?;
        for ((scenario, status), count) in &self.by_scenario {
            writeln!(f, "  {:<16} {:>3}  {}", scenario.name(), status, count)?;
        }
        writeln!(f, "unexpected statuses: {}", self.unexpected)?;
        write!(f, "transport errors: {}", self.transport_errors)
    }
}
