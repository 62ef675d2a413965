//! Fail-fast validation of a proposed period against the existing ones.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. the name is not blank
//! 2. the start date parses
//! 3. the end date parses
//! 4. the end falls strictly after the start
//! 5. (optional) no other period already uses the name
//! 6. no other period overlaps the new range
//!
//! The list of existing periods comes from the caller. When fetching it
//! fails, pass an empty slice: the overlap check is skipped and the server
//! has the final word.

use serde::{Deserialize, Serialize};

use crate::{MonthDay, MonthDayRange, ParseError, ParseErrorKind, Period, PeriodId, prelude::*};

/// The raw form fields of a period being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDraft {
    #[serde(alias = "nombre")]
    pub name:  String,
    #[serde(alias = "fecha_inicio")]
    pub start: String,
    #[serde(alias = "fecha_fin")]
    pub end:   String,
}

impl PeriodDraft {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            start: start.into(),
            end:   end.into(),
        }
    }
}

/// Optional checks on top of the fixed sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRules {
    /// Reject a name already used by another period (exact match after trimming).
    pub reject_duplicate_names: bool,
}

/// Which date field of the draft failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// Coarse reason code handed to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RejectionKind {
    InvalidFormat,
    InvalidRange,
    MissingName,
    EndBeforeOrEqualStart,
    DuplicateName,
    OverlapsExisting,
}

/// Why a draft was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Period name is required")]
    MissingName,

    #[error("Invalid {field} date: {source}")]
    InvalidDate {
        field:  DateField,
        #[source]
        source: ParseError,
    },

    #[error("End date ({end}) must be after start date ({start})")]
    EndBeforeOrEqualStart { start: MonthDay, end: MonthDay },

    #[error("A period named \"{name}\" already exists")]
    DuplicateName { id: PeriodId, name: String },

    #[error("Dates overlap with period \"{name}\" ({range})")]
    OverlapsExisting {
        id:    PeriodId,
        name:  String,
        range: MonthDayRange,
    },
}

impl Rejection {
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::MissingName => RejectionKind::MissingName,
            Self::InvalidDate { source, .. } => match source.kind() {
                ParseErrorKind::Format => RejectionKind::InvalidFormat,
                ParseErrorKind::Range => RejectionKind::InvalidRange,
            },
            Self::EndBeforeOrEqualStart { .. } => RejectionKind::EndBeforeOrEqualStart,
            Self::DuplicateName { .. } => RejectionKind::DuplicateName,
            Self::OverlapsExisting { .. } => RejectionKind::OverlapsExisting,
        }
    }

    /// Name of the period the draft collides with, if any.
    pub fn conflicting_period(&self) -> Option<&str> {
        match self {
            Self::DuplicateName { name, .. } | Self::OverlapsExisting { name, .. } => Some(name),
            Self::MissingName | Self::InvalidDate { .. } | Self::EndBeforeOrEqualStart { .. } => None,
        }
    }
}

/// On success, carries the parsed range so callers do not parse twice.
pub type ValidationResult = Result<MonthDayRange, Rejection>;

/// JSON shape of a validation outcome: `{ok, reason?, conflictingPeriod?, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub ok:                 bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason:             Option<RejectionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message:            Option<String>,
}

impl From<&ValidationResult> for ValidationReport {
    fn from(result: &ValidationResult) -> Self {
        match result {
            Ok(_) => Self {
                ok:                 true,
                reason:             None,
                conflicting_period: None,
                message:            None,
            },
            Err(rejection) => Self {
                ok:                 false,
                reason:             Some(rejection.kind()),
                conflicting_period: rejection.conflicting_period().map(str::to_owned),
                message:            Some(rejection.to_string()),
            },
        }
    }
}

/// Validator carrying the optional rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodValidator {
    rules: PeriodRules,
}

impl PeriodValidator {
    pub const fn new(rules: PeriodRules) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> PeriodRules {
        self.rules
    }

    /// Validates `draft` against `existing`, ignoring the period with
    /// `exclude_id` (the one being edited).
    ///
    /// # Errors
    /// Returns the first [`Rejection`] in check order.
    pub fn validate(&self, draft: &PeriodDraft, existing: &[Period], exclude_id: Option<PeriodId>) -> ValidationResult {
        let result = self.check(draft, existing, exclude_id);
        match &result {
            Ok(range) => tracing::debug!(name = draft.name.trim(), %range, "period draft accepted"),
            Err(rejection) => tracing::debug!(
                name = draft.name.trim(),
                kind = %rejection.kind(),
                "period draft rejected: {rejection}"
            ),
        }
        result
    }

    fn check(&self, draft: &PeriodDraft, existing: &[Period], exclude_id: Option<PeriodId>) -> ValidationResult {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Rejection::MissingName);
        }

        let start = draft
            .start
            .parse::<MonthDay>()
            .map_err(|source| Rejection::InvalidDate {
                field: DateField::Start,
                source,
            })?;
        let end = draft.end.parse::<MonthDay>().map_err(|source| Rejection::InvalidDate {
            field: DateField::End,
            source,
        })?;

        let range = MonthDayRange::new(start, end).map_err(|_| Rejection::EndBeforeOrEqualStart { start, end })?;

        if self.rules.reject_duplicate_names {
            if let Some(taken) = others(existing, exclude_id).find(|p| p.name().trim() == name) {
                return Err(Rejection::DuplicateName {
                    id:   taken.id(),
                    name: taken.name().to_owned(),
                });
            }
        }

        if let Some(conflict) = first_conflict(&range, existing, exclude_id) {
            return Err(Rejection::OverlapsExisting {
                id:    conflict.id(),
                name:  conflict.name().to_owned(),
                range: *conflict.range(),
            });
        }

        Ok(range)
    }
}

fn others(existing: &[Period], exclude_id: Option<PeriodId>) -> impl Iterator<Item = &Period> {
    existing.iter().filter(move |p| Some(p.id()) != exclude_id)
}

/// First period in `existing` (skipping `exclude_id`) whose range overlaps `range`.
pub fn first_conflict<'a>(
    range: &MonthDayRange,
    existing: &'a [Period],
    exclude_id: Option<PeriodId>,
) -> Option<&'a Period> {
    others(existing, exclude_id).find(|p| {
        let hit = range.overlaps(p.range());
        tracing::trace!(candidate = %range, existing = %p.range(), id = p.id(), hit, "overlap check");
        hit
    })
}

/// Validates with the default rules: the plain name, dates, order, overlap sequence.
///
/// # Errors
/// Returns the first [`Rejection`] in check order.
pub fn validate(draft: &PeriodDraft, existing: &[Period], exclude_id: Option<PeriodId>) -> ValidationResult {
    PeriodValidator::default().validate(draft, existing, exclude_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{draft, md, month_day_strategy, period, range};
    use proptest::prelude::*;

    fn semesters() -> Vec<Period> {
        vec![
            period(1, "Semester 1", "01-15", "06-10"),
            period(2, "Semester 2", "07-01", "11-30"),
        ]
    }

    #[test]
    fn test_overlapping_draft_names_conflict() {
        let existing = [period(1, "Q1", "01-15", "02-15")];
        let result = validate(&draft("January", "01-01", "01-31"), &existing, None);

        let rejection = result.expect_err("overlaps Q1");
        assert_eq!(rejection.kind(), RejectionKind::OverlapsExisting);
        assert_eq!(rejection.conflicting_period(), Some("Q1"));
    }

    #[test]
    fn test_disjoint_draft_is_accepted() {
        let existing = [period(1, "Q1", "01-01", "02-28")];
        let result = validate(&draft("March", "03-01", "03-31"), &existing, None);
        assert_eq!(result, Ok(range("03-01", "03-31")));
    }

    #[test]
    fn test_rejection_kinds_in_order() {
        struct TestCase {
            draft:       PeriodDraft,
            kind:        RejectionKind,
            description: &'static str,
        }

        let cases = [
            TestCase {
                draft:       draft("", "ab-01", "02-30"),
                kind:        RejectionKind::MissingName,
                description: "missing name wins over bad dates",
            },
            TestCase {
                draft:       draft("   ", "01-01", "01-31"),
                kind:        RejectionKind::MissingName,
                description: "blank name",
            },
            TestCase {
                draft:       draft("Term", "ab-01", "02-30"),
                kind:        RejectionKind::InvalidFormat,
                description: "bad start format checked before end",
            },
            TestCase {
                draft:       draft("Term", "02-30", "ab-01"),
                kind:        RejectionKind::InvalidRange,
                description: "impossible start date",
            },
            TestCase {
                draft:       draft("Term", "01-01", "13-01"),
                kind:        RejectionKind::InvalidRange,
                description: "impossible end month",
            },
            TestCase {
                draft:       draft("Term", "01-01", "0131"),
                kind:        RejectionKind::InvalidFormat,
                description: "end without separator",
            },
            TestCase {
                draft:       draft("Term", "06-10", "01-15"),
                kind:        RejectionKind::EndBeforeOrEqualStart,
                description: "range wraps past year end",
            },
            TestCase {
                draft:       draft("Term", "03-03", "03-03"),
                kind:        RejectionKind::EndBeforeOrEqualStart,
                description: "single-day range",
            },
            TestCase {
                draft:       draft("Term", "06-10", "06-30"),
                kind:        RejectionKind::OverlapsExisting,
                description: "shares the last day of semester 1",
            },
        ];

        let existing = semesters();
        for case in &cases {
            let rejection = validate(&case.draft, &existing, None).expect_err(case.description);
            assert_eq!(rejection.kind(), case.kind, "{}", case.description);
        }
    }

    #[test]
    fn test_invalid_date_reports_field() {
        let rejection = validate(&draft("Term", "01-01", "02-30"), &[], None).expect_err("bad end");
        assert_eq!(
            rejection,
            Rejection::InvalidDate {
                field:  DateField::End,
                source: ParseError::InvalidDay { month: 2, day: 30 },
            }
        );
        assert_eq!(rejection.to_string(), "Invalid end date: Invalid day 30 for month 02");
    }

    #[test]
    fn test_end_before_start_carries_dates() {
        let rejection = validate(&draft("Term", "06-10", "01-15"), &[], None).expect_err("inverted");
        assert_eq!(
            rejection,
            Rejection::EndBeforeOrEqualStart {
                start: md(6, 10),
                end:   md(1, 15),
            }
        );
    }

    #[test]
    fn test_exclude_id_skips_period_being_edited() {
        let existing = semesters();
        let edited = draft("Semester 1", "01-10", "06-15");

        let rejection = validate(&edited, &existing, None).expect_err("overlaps itself when not excluded");
        assert_eq!(rejection.conflicting_period(), Some("Semester 1"));

        assert_eq!(validate(&edited, &existing, Some(1)), Ok(range("01-10", "06-15")));
    }

    #[test]
    fn test_exclude_id_does_not_hide_other_conflicts() {
        let existing = semesters();
        let rejection = validate(&draft("Semester 1", "01-10", "07-15"), &existing, Some(1))
            .expect_err("still overlaps semester 2");
        assert_eq!(rejection.conflicting_period(), Some("Semester 2"));
    }

    #[test]
    fn test_first_conflict_in_list_order() {
        let existing = semesters();
        let whole_year = range("01-01", "12-31");
        let conflict = first_conflict(&whole_year, &existing, None).expect("conflicts");
        assert_eq!(conflict.id(), 1);
        assert_eq!(first_conflict(&whole_year, &existing, Some(1)).map(Period::id), Some(2));
        assert_eq!(first_conflict(&range("12-01", "12-31"), &existing, None), None);
    }

    #[test]
    fn test_empty_existing_list_skips_overlap_check() {
        assert!(validate(&draft("Anything", "01-01", "12-31"), &[], None).is_ok());
    }

    #[test]
    fn test_duplicate_names_allowed_by_default() {
        let existing = semesters();
        assert!(validate(&draft("Semester 1", "12-01", "12-31"), &existing, None).is_ok());
    }

    #[test]
    fn test_duplicate_name_rule() {
        let validator = PeriodValidator::new(PeriodRules {
            reject_duplicate_names: true,
        });
        let existing = semesters();

        let rejection = validator
            .validate(&draft(" Semester 2 ", "12-01", "12-31"), &existing, None)
            .expect_err("name taken");
        assert_eq!(rejection.kind(), RejectionKind::DuplicateName);
        assert_eq!(rejection.conflicting_period(), Some("Semester 2"));

        // Renaming to its own name while editing is fine
        assert!(validator
            .validate(&draft("Semester 2", "12-01", "12-31"), &existing, Some(2))
            .is_ok());
    }

    #[test]
    fn test_duplicate_name_checked_before_overlap() {
        let validator = PeriodValidator::new(PeriodRules {
            reject_duplicate_names: true,
        });
        let rejection = validator
            .validate(&draft("Semester 2", "01-01", "01-31"), &semesters(), None)
            .expect_err("both rules fail");
        assert_eq!(rejection.kind(), RejectionKind::DuplicateName);
    }

    #[test]
    fn test_report_for_success() {
        let report = ValidationReport::from(&validate(&draft("March", "03-01", "03-31"), &[], None));
        assert_eq!(serde_json::to_value(&report).expect("serialize"), serde_json::json!({"ok": true}));
    }

    #[test]
    fn test_report_for_overlap() {
        let existing = [period(1, "Q1", "01-15", "02-15")];
        let report = ValidationReport::from(&validate(&draft("January", "01-01", "01-31"), &existing, None));
        assert_eq!(
            serde_json::to_value(&report).expect("serialize"),
            serde_json::json!({
                "ok": false,
                "reason": "OverlapsExisting",
                "conflictingPeriod": "Q1",
                "message": "Dates overlap with period \"Q1\" (01-15/02-15)",
            })
        );
    }

    #[test]
    fn test_report_without_conflict() {
        let report = ValidationReport::from(&validate(&draft("", "01-01", "01-31"), &[], None));
        assert!(!report.ok);
        assert_eq!(report.reason, Some(RejectionKind::MissingName));
        assert_eq!(report.conflicting_period, None);
    }

    #[test]
    fn test_draft_from_form_fields() {
        let json = r#"{"nombre": "Periodo 1", "fecha_inicio": "01-15", "fecha_fin": "04-15"}"#;
        let parsed: PeriodDraft = serde_json::from_str(json).expect("form payload");
        assert_eq!(parsed, draft("Periodo 1", "01-15", "04-15"));
    }

    proptest! {
        #[test]
        fn prop_excluding_self_never_self_conflicts(a in month_day_strategy(), b in month_day_strategy()) {
            prop_assume!(a < b);
            let existing = [Period::from_dates(9, "Self", a, b).expect("ordered")];
            let candidate = PeriodDraft::new("Self", a.to_string(), b.to_string());

            let rejection = validate(&candidate, &existing, None).expect_err("a period overlaps itself");
            prop_assert_eq!(rejection.kind(), RejectionKind::OverlapsExisting);
            prop_assert!(validate(&candidate, &existing, Some(9)).is_ok());
        }
    }
}
