//! Check evaluation: compare discovered facts with declared expectations.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;
use stanza_manifest::{FileExpectation, FileKind, FileMode, ServiceExpectation};

use crate::domain::platform::{AttributePolicy, Platform};

// ── Facts ─────────────────────────────────────────────────────────────────────

/// Attributes discovered for a path that exists.
///
/// `mode`, `owner` and `group` are `None` where the platform has no such notion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFacts {
    pub kind: FileKind,
    pub mode: Option<FileMode>,
    pub owner: Option<String>,
    pub group: Option<String>,
}

/// Result of inspecting one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileProbe {
    Found(FileFacts),
    Missing,
    /// The path could not be inspected (e.g. permission denied on a parent).
    Unreadable(String),
}

/// State reported by the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)] // mirrors the three independent service assertions
pub struct ServiceFacts {
    pub installed: bool,
    pub enabled: bool,
    pub running: bool,
}

/// Result of querying the service manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceProbe {
    Queried(ServiceFacts),
    /// The service manager could not be queried.
    Unavailable(String),
}

// ── Results ───────────────────────────────────────────────────────────────────

/// The property a single check asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Exists,
    Type,
    Mode,
    Owner,
    Group,
    Installed,
    Enabled,
    Running,
}

impl Attribute {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Type => "type",
            Self::Mode => "mode",
            Self::Owner => "owner",
            Self::Group => "group",
            Self::Installed => "installed",
            Self::Enabled => "enabled",
            Self::Running => "running",
        }
    }
}

/// Outcome of one assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed,
    Failed { expected: String, actual: String },
    Skipped { reason: String },
}

/// One assertion against one subject (a path or a service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub subject: String,
    pub attribute: Attribute,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Failed { .. })
    }

    /// Human-readable one-liner, e.g. `stanza.db mode: expected 0600, found 0644`.
    #[must_use]
    pub fn describe(&self) -> String {
        let attr = self.attribute.as_str();
        match &self.outcome {
            CheckOutcome::Passed => format!("{} {attr}", self.subject),
            CheckOutcome::Failed { expected, actual } => {
                format!("{} {attr}: expected {expected}, found {actual}", self.subject)
            }
            CheckOutcome::Skipped { reason } => {
                format!("{} {attr}: skipped ({reason})", self.subject)
            }
        }
    }
}

/// Pass/fail/skip counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: usize,
}

/// All results of one verification run, in manifest order.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub platform: Platform,
    pub results: Vec<CheckResult>,
}

impl VerificationReport {
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            passed: 0,
            failed: 0,
            skipped: 0,
            total: self.results.len(),
        };
        for result in &self.results {
            match result.outcome {
                CheckOutcome::Passed => summary.passed += 1,
                CheckOutcome::Failed { .. } => summary.failed += 1,
                CheckOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.is_failed())
    }

    /// Skipped checks do not count against success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

// ── Evaluation ────────────────────────────────────────────────────────────────

const PRESENT: &str = "present";
const ABSENT: &str = "absent";
const UNKNOWN: &str = "unknown";

fn passed(subject: &str, attribute: Attribute) -> CheckResult {
    CheckResult {
        subject: subject.to_string(),
        attribute,
        outcome: CheckOutcome::Passed,
    }
}

fn failed(subject: &str, attribute: Attribute, expected: &str, actual: &str) -> CheckResult {
    CheckResult {
        subject: subject.to_string(),
        attribute,
        outcome: CheckOutcome::Failed {
            expected: expected.to_string(),
            actual: actual.to_string(),
        },
    }
}

fn compare(subject: &str, attribute: Attribute, expected: &str, actual: &str) -> CheckResult {
    if expected == actual {
        passed(subject, attribute)
    } else {
        failed(subject, attribute, expected, actual)
    }
}

/// Attributes asserted for `expect` under `policy`, with their expected values.
fn asserted_attributes(
    expect: &FileExpectation,
    policy: AttributePolicy,
) -> Vec<(Attribute, String)> {
    if policy == AttributePolicy::ExistenceOnly {
        return Vec::new();
    }
    let mut out = vec![(Attribute::Type, expect.kind.as_str().to_string())];
    if let Some(mode) = expect.mode {
        out.push((Attribute::Mode, mode.to_string()));
    }
    if let Some(owner) = &expect.owner {
        out.push((Attribute::Owner, owner.clone()));
    }
    if let Some(group) = &expect.group {
        out.push((Attribute::Group, group.clone()));
    }
    out
}

fn actual_attribute(facts: &FileFacts, attribute: Attribute) -> String {
    let value = match attribute {
        Attribute::Type => Some(facts.kind.as_str().to_string()),
        Attribute::Mode => facts.mode.map(|m| m.to_string()),
        Attribute::Owner => facts.owner.clone(),
        Attribute::Group => facts.group.clone(),
        _ => None,
    };
    value.unwrap_or_else(|| UNKNOWN.to_string())
}

/// Evaluate one path. Always yields an `exists` result first.
///
/// A missing or unreadable path fails `exists` and every attribute it would
/// have been checked for; nothing is skipped.
#[must_use]
pub fn evaluate_file(
    expect: &FileExpectation,
    probe: &FileProbe,
    policy: AttributePolicy,
) -> Vec<CheckResult> {
    let subject = expect.path.as_str();
    let asserted = asserted_attributes(expect, policy);
    let mut results = Vec::with_capacity(asserted.len() + 1);

    match probe {
        FileProbe::Found(facts) => {
            results.push(passed(subject, Attribute::Exists));
            for (attribute, expected) in asserted {
                let actual = actual_attribute(facts, attribute);
                results.push(compare(subject, attribute, &expected, &actual));
            }
        }
        FileProbe::Missing => {
            results.push(failed(subject, Attribute::Exists, PRESENT, ABSENT));
            for (attribute, expected) in asserted {
                results.push(failed(subject, attribute, &expected, ABSENT));
            }
        }
        FileProbe::Unreadable(reason) => {
            results.push(failed(subject, Attribute::Exists, PRESENT, reason));
            for (attribute, expected) in asserted {
                results.push(failed(subject, attribute, &expected, reason));
            }
        }
    }
    results
}

/// Report every check for a path that is not installed on this release as
/// skipped, `exists` first.
#[must_use]
pub fn skip_file(expect: &FileExpectation, policy: AttributePolicy, reason: &str) -> Vec<CheckResult> {
    std::iter::once(Attribute::Exists)
        .chain(asserted_attributes(expect, policy).into_iter().map(|(attribute, _)| attribute))
        .map(|attribute| CheckResult {
            subject: expect.path.clone(),
            attribute,
            outcome: CheckOutcome::Skipped {
                reason: reason.to_string(),
            },
        })
        .collect()
}

fn service_label(attribute: Attribute, state: bool) -> String {
    let word = attribute.as_str();
    if state {
        word.to_string()
    } else {
        format!("not {word}")
    }
}

/// Evaluate the service expectation: `installed`, `enabled`, `running`, in that order.
#[must_use]
pub fn evaluate_service(
    expect: &ServiceExpectation,
    probe: &ServiceProbe,
    platform: &Platform,
) -> Vec<CheckResult> {
    let subject = format!("service {}", expect.name);
    let expectations = [
        (Attribute::Installed, expect.installed),
        (Attribute::Enabled, expect.enabled),
        (Attribute::Running, expect.running),
    ];

    if platform.service_checks_skipped(expect) {
        let reason = platform.skip_reason();
        return expectations
            .iter()
            .map(|&(attribute, _)| CheckResult {
                subject: subject.clone(),
                attribute,
                outcome: CheckOutcome::Skipped {
                    reason: reason.clone(),
                },
            })
            .collect();
    }

    expectations
        .iter()
        .map(|&(attribute, want)| {
            let expected = service_label(attribute, want);
            match probe {
                ServiceProbe::Queried(facts) => {
                    let have = match attribute {
                        Attribute::Installed => facts.installed,
                        Attribute::Enabled => facts.enabled,
                        _ => facts.running,
                    };
                    compare(&subject, attribute, &expected, &service_label(attribute, have))
                }
                ServiceProbe::Unavailable(reason) => {
                    failed(&subject, attribute, &expected, &format!("unavailable: {reason}"))
                }
            }
        })
        .collect()
}

// ── Unit tests ────────────────────────────────────────────────────────────────
