use chrono::{DateTime, Utc};
use console::style;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::OutputFormat;
use crate::probes::ProbeResult;

/// The five probe results, in suite order
///
/// A fixed-shape mapping: serialization always yields exactly these five
/// keys, in this order, whatever the run outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSet {
    pub connectivity: ProbeResult,
    pub balance: ProbeResult,
    pub sms: ProbeResult,
    pub voice: ProbeResult,
    pub esim: ProbeResult,
}

impl ProbeSet {
    /// Iterate results in suite order
    pub fn iter(&self) -> [(&'static str, &ProbeResult); 5] {
        [
            ("connectivity", &self.connectivity),
            ("balance", &self.balance),
            ("sms", &self.sms),
            ("voice", &self.voice),
            ("esim", &self.esim),
        ]
    }

    pub fn passed(&self) -> usize {
        self.iter().iter().filter(|(_, r)| r.success).count()
    }

    pub fn failed(&self) -> usize {
        5 - self.passed()
    }
}

/// Complete report of one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub timestamp: DateTime<Utc>,
    /// True iff the connectivity and balance probes both succeeded
    pub ready: bool,
    pub probes: ProbeSet,
}

impl SuiteReport {
    pub fn new(probes: ProbeSet) -> Self {
        Self {
            timestamp: Utc::now(),
            ready: probes.connectivity.success && probes.balance.success,
            probes,
        }
    }
}

/// Output formatter trait
pub trait OutputFormatter {
    fn format(&self, report: &SuiteReport) -> String;
}

/// Human-readable console output formatter
pub struct HumanFormatter {
    use_colors: bool,
}

impl HumanFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn pass_mark(&self) -> String {
        if self.use_colors {
            style("PASS").green().bold().to_string()
        } else {
            "PASS".to_string()
        }
    }

    fn fail_mark(&self) -> String {
        if self.use_colors {
            style("FAIL").red().bold().to_string()
        } else {
            "FAIL".to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format(&self, report: &SuiteReport) -> String {
        let mut output = String::new();

        output.push_str("\nTest Results Summary\n");
        output.push_str("==============================\n");

        for (key, result) in report.probes.iter() {
            let mark = if result.success {
                self.pass_mark()
            } else {
                self.fail_mark()
            };
            output.push_str(&format!(
                "{:<14} {} ({}ms)\n",
                key, mark, result.duration_ms
            ));

            if let Some(detail) = &result.detail {
                if self.use_colors {
                    output.push_str(&format!("    {}\n", style(detail).dim()));
                } else {
                    output.push_str(&format!("    {}\n", detail));
                }
            }

            if !result.success {
                if let Some(error) = &result.error {
                    if self.use_colors {
                        output.push_str(&format!("    Error: {}\n", style(error).red()));
                    } else {
                        output.push_str(&format!("    Error: {}\n", error));
                    }
                }
            }
        }

        output.push_str(&format!(
            "\nPassed: {} | Failed: {}\n",
            report.probes.passed(),
            report.probes.failed()
        ));

        output
    }
}

/// JSON output formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &SuiteReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

/// Get formatter based on output format
pub fn get_formatter(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

/// Write the results mapping as indented JSON, overwriting any prior content
pub fn write_results(probes: &ProbeSet, path: &Path) -> crate::error::Result<()> {
    let json = serde_json::to_string_pretty(probes)?;
    std::fs::write(path, json)?;
    Ok(())
}
