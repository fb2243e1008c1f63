// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod auction;
pub mod bidding;
pub mod rules;
// endregion: --- Imports

// region:    --- Violation Report

/// 어긋난 필드와 사유 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// 검증 결과
/// 비어 있으면 통과, 아니면 위반 목록 전체를 담는다
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// 다른 결과를 그대로 이어 붙이기
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// 내장 객체의 결과를 필드 접두어를 붙여 이어 붙이기
    /// 예: "Product" 아래의 "Name" 위반은 "Product.Name"이 된다
    pub fn merge_nested(&mut self, prefix: &str, other: ValidationReport) {
        for violation in other.violations {
            self.violations.push(Violation {
                field: format!("{}.{}", prefix, violation.field),
                message: violation.message,
            });
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

// endregion: --- Violation Report

// region:    --- Rules

/// 검증 규칙 한 건
/// check가 false를 돌려주면 (field, message) 위반으로 기록된다
pub struct Rule<T> {
    field: &'static str,
    message: String,
    guard: Option<Box<dyn Fn(&T) -> bool>>,
    check: Box<dyn Fn(&T) -> bool>,
}

impl<T> Rule<T> {
    pub fn new(
        field: &'static str,
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        Rule {
            field,
            message: message.into(),
            guard: None,
            check: Box::new(check),
        }
    }

    /// 선행 조건이 참일 때에만 검사하는 규칙으로 바꾸기
    pub fn when(mut self, guard: impl Fn(&T) -> bool + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }
}

/// 규칙 목록을 순서대로 적용해 위반 전체를 모은다
pub fn run_rules<T>(subject: &T, rules: &[Rule<T>]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for rule in rules {
        if let Some(guard) = &rule.guard {
            if !guard(subject) {
                continue;
            }
        }
        if !(rule.check)(subject) {
            report.push(rule.field, rule.message.clone());
        }
    }
    report
}

// endregion: --- Rules

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
    }

    #[test]
    fn push_records_violation() {
        let mut report = ValidationReport::new();
        report.push("Name", "name is required");
        assert!(!report.is_valid());
        assert_eq!(report.violations[0].field, "Name");
        assert_eq!(report.violations[0].message, "name is required");
    }

    #[test]
    fn merge_nested_prefixes_fields() {
        let mut inner = ValidationReport::new();
        inner.push("Offerer.Name", "name is required");
        let mut outer = ValidationReport::new();
        outer.merge_nested("Product", inner);
        assert_eq!(outer.violations[0].field, "Product.Offerer.Name");
    }

    #[test]
    fn rules_collect_in_order() {
        let rules = vec![
            Rule::new("A", "first", |value: &i32| *value > 0),
            Rule::new("B", "second", |value: &i32| *value > 10),
        ];
        let report = run_rules(&-1, &rules);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].field, "A");
        assert_eq!(report.violations[1].field, "B");
    }

    #[test]
    fn guarded_rule_skips_when_precondition_fails() {
        let rules = vec![
            Rule::new("Value", "must be under 100", |value: &i32| *value < 100)
                .when(|value: &i32| *value > 0),
        ];
        assert!(run_rules(&-5, &rules).is_valid());
        assert!(!run_rules(&150, &rules).is_valid());
    }

    #[test]
    fn report_display_lists_violations() {
        let mut report = ValidationReport::new();
        report.push("Name", "name is required");
        report.push("Role", "at least one role is required");
        assert_eq!(
            report.to_string(),
            "Name: name is required, Role: at least one role is required"
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = ValidationReport::new();
        report.push("Price", "price can't be lower than last price");
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"violations":[{"field":"Price","message":"price can't be lower than last price"}]}"#
        );
    }
}
