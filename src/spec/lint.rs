//! Sanity checks for descriptor lists before a validator is built from them.

use super::types::{ParameterLocation, ParameterMeta, ParameterType, ValueSchema};
use std::collections::HashSet;
use tracing::warn;

/// A problem found in a parameter descriptor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorIssue {
    /// `<location>.<name>` of the offending descriptor
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl DescriptorIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DescriptorIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Check a descriptor list for mistakes that would make validation meaningless.
///
/// Returns every issue found, in descriptor order.
#[must_use]
pub fn lint_parameters(params: &[ParameterMeta]) -> Vec<DescriptorIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut body_count = 0usize;

    for param in params {
        let at = format!("{}.{}", param.location, param.name);

        if !seen.insert((param.location, param.name.as_str())) {
            issues.push(DescriptorIssue::new(
                &at,
                "duplicate",
                "parameter declared more than once",
            ));
        }
        if param.location == ParameterLocation::Path && !param.required {
            issues.push(DescriptorIssue::new(
                &at,
                "path_not_required",
                "path parameters must be required",
            ));
        }
        if param.location == ParameterLocation::Body {
            body_count += 1;
            if body_count == 2 {
                issues.push(DescriptorIssue::new(
                    &at,
                    "multiple_body",
                    "only one body parameter is allowed",
                ));
            }
        }
        lint_schema(&at, &param.schema, &mut issues);
    }

    for issue in &issues {
        warn!(
            location = %issue.location,
            kind = %issue.kind,
            message = %issue.message,
            "Parameter descriptor issue"
        );
    }
    issues
}

fn lint_schema(at: &str, schema: &ValueSchema, issues: &mut Vec<DescriptorIssue>) {
    let c = &schema.constraints;
    if let (Some(min), Some(max)) = (&c.minimum, &c.maximum) {
        if min.as_f64() > max.as_f64() {
            issues.push(DescriptorIssue::new(
                at,
                "inverted_range",
                format!("minimum {min} is greater than maximum {max}"),
            ));
        }
    }
    if let (Some(min), Some(max)) = (c.min_length, c.max_length) {
        if min > max {
            issues.push(DescriptorIssue::new(
                at,
                "inverted_length",
                format!("minLength {min} is greater than maxLength {max}"),
            ));
        }
    }
    match (&schema.param_type, schema.items.as_deref()) {
        (ParameterType::Array, None) => issues.push(DescriptorIssue::new(
            at,
            "missing_items",
            "array parameters must declare items",
        )),
        (ParameterType::Array, Some(items)) => lint_schema(&format!("{at}[]"), items, issues),
        _ => {}
    }
}

/// Render issues as one line each, `[kind] location: message`.
#[must_use]
pub fn format_issues(issues: &[DescriptorIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("[{}] {}: {}", i.kind, i.location, i.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Constraints, ValueSchema};
    use serde_json::Number;

    #[test]
    fn test_clean_list_has_no_issues() {
        let params = vec![
            ParameterMeta::new("p1", ParameterLocation::Path, ParameterType::Integer).required(),
            ParameterMeta::new("a1", ParameterLocation::Query, ParameterType::Array)
                .with_items(ValueSchema::new(ParameterType::Integer)),
        ];
        assert!(lint_parameters(&params).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let params = vec![
            ParameterMeta::new("p1", ParameterLocation::Path, ParameterType::Integer),
            ParameterMeta::new("q1", ParameterLocation::Query, ParameterType::Integer)
                .with_constraints(Constraints {
                    minimum: Some(Number::from(5)),
                    maximum: Some(Number::from(1)),
                    ..Constraints::default()
                }),
            ParameterMeta::new("q1", ParameterLocation::Query, ParameterType::Array),
        ];
        let kinds: Vec<String> = lint_parameters(&params)
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(
            kinds,
            vec!["path_not_required", "inverted_range", "duplicate", "missing_items"]
        );
    }

    #[test]
    fn test_same_name_in_different_locations_is_fine() {
        let params = vec![
            ParameterMeta::new("id", ParameterLocation::Query, ParameterType::String),
            ParameterMeta::new("id", ParameterLocation::Header, ParameterType::String),
        ];
        assert!(lint_parameters(&params).is_empty());
    }

    #[test]
    fn test_format_issues() {
        let issues = vec![DescriptorIssue::new("query.q", "duplicate", "twice")];
        assert_eq!(format_issues(&issues), "[duplicate] query.q: twice");
    }
}
