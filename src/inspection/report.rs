//! Issue aggregation
//!
//! The report is a text filter over status labels: anything naming a defect is
//! kept in evaluation order, and a clean bottle reports the single sentinel.

use std::fmt;

use crate::inspection::rules::DefectStatus;

pub const NO_ISSUE: &str = "No Issue";

/// Substrings that mark a status label as a defect.
pub const ABNORMAL_KEYWORDS: [&str; 6] = [
    "Missing",
    "Defect",
    "Underfilled",
    "Overfilled",
    "Empty",
    "Misaligned",
];

pub fn is_abnormal(label: &str) -> bool {
    ABNORMAL_KEYWORDS.iter().any(|keyword| label.contains(keyword))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    issues: Vec<String>,
}

impl IssueReport {
    /// Statuses must arrive in evaluation order: cap, label, fill, alignment.
    pub fn aggregate<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = DefectStatus>,
    {
        let mut issues: Vec<String> = statuses
            .into_iter()
            .filter(|status| is_abnormal(status.label))
            .map(|status| status.label.to_string())
            .collect();

        if issues.is_empty() {
            issues.push(NO_ISSUE.to_string());
        }

        Self { issues }
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn passed(&self) -> bool {
        self.issues.len() == 1 && self.issues[0] == NO_ISSUE
    }
}

impl fmt::Display for IssueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.issues.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::rules::{
        CAP_MISSING, CAP_PRESENT, DisplayColor, EMPTY, LABEL_OK, MISALIGNED, PRINTING_DEFECT,
        PROPERLY_ALIGNED, PROPERLY_FILLED,
    };

    fn status(label: &'static str) -> DefectStatus {
        DefectStatus::new(label, DisplayColor::Red)
    }

    #[test]
    fn test_all_ok_yields_sentinel() {
        let report = IssueReport::aggregate([
            status(CAP_PRESENT),
            status(LABEL_OK),
            status(PROPERLY_FILLED),
            status(PROPERLY_ALIGNED),
        ]);

        assert_eq!(report.issues(), [NO_ISSUE]);
        assert!(report.passed());
        assert_eq!(report.to_string(), NO_ISSUE);
    }

    #[test]
    fn test_keeps_evaluation_order() {
        let report = IssueReport::aggregate([
            status(CAP_MISSING),
            status(PRINTING_DEFECT),
            status(EMPTY),
            status(MISALIGNED),
        ]);

        assert_eq!(
            report.issues(),
            [CAP_MISSING, PRINTING_DEFECT, EMPTY, MISALIGNED]
        );
        assert!(!report.passed());
        assert_eq!(
            report.to_string(),
            "Cap Missing | Possible Printing Defect | Empty | Misaligned"
        );
    }

    #[test]
    fn test_filter_is_textual() {
        assert!(is_abnormal("Label Missing"));
        assert!(!is_abnormal("Properly Filled"));
        assert!(!is_abnormal("Label is OK"));
    }
}
