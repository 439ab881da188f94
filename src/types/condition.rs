//! Condition entries for policy statements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::one_or_many::OneOrMany;

/// The rendered `Condition` block: operator name, then condition variable,
/// then the value list with the one-or-many collapsing rule applied.
pub type ConditionMap = BTreeMap<String, BTreeMap<String, OneOrMany<String>>>;

/// One condition test on a statement.
///
/// Operator names (`StringEquals`, `StringLike`, ...) are passed through
/// verbatim; the RGW policy engine owns the operator catalogue, not us.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Condition {
    test: String,
    variable: String,
    values: Vec<String>,
}

impl Condition {
    pub fn new(
        test: impl Into<String>,
        variable: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            test: test.into(),
            variable: variable.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn test(&self) -> &str {
        &self.test
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Group a statement's conditions by operator and variable.
///
/// Conditions sharing an operator collapse into one object; a repeated
/// (operator, variable) pair concatenates its value lists in authoring order.
pub fn group_conditions(conditions: &[Condition]) -> ConditionMap {
    let mut grouped: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    for condition in conditions {
        grouped
            .entry(condition.test.clone())
            .or_default()
            .entry(condition.variable.clone())
            .or_default()
            .extend(condition.values.iter().cloned());
    }

    grouped
        .into_iter()
        .map(|(test, variables)| {
            let variables = variables
                .into_iter()
                .map(|(variable, values)| (variable, OneOrMany::from(values)))
                .collect();
            (test, variables)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_renders_as_bare_string() {
        let conditions = [Condition::new("StringEquals", "aws:SourceIp", ["10.0.0.1"])];
        let grouped = group_conditions(&conditions);
        let rendered = serde_json::to_string(&grouped).unwrap();
        assert_eq!(rendered, r#"{"StringEquals":{"aws:SourceIp":"10.0.0.1"}}"#);
    }

    #[test]
    fn test_multiple_values_render_as_array() {
        let conditions = [Condition::new(
            "StringLike",
            "s3:prefix",
            ["home/", "public/"],
        )];
        let grouped = group_conditions(&conditions);
        let rendered = serde_json::to_string(&grouped).unwrap();
        assert_eq!(
            rendered,
            r#"{"StringLike":{"s3:prefix":["home/","public/"]}}"#
        );
    }

    #[test]
    fn test_shared_operator_collapses_into_one_object() {
        let conditions = [
            Condition::new("StringEquals", "aws:username", ["alice"]),
            Condition::new("StringEquals", "s3:x-amz-acl", ["public-read"]),
        ];
        let grouped = group_conditions(&conditions);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["StringEquals"].len(), 2);
    }

    #[test]
    fn test_repeated_operator_variable_concatenates_in_order() {
        let conditions = [
            Condition::new("StringEquals", "aws:username", ["bob"]),
            Condition::new("StringEquals", "aws:username", ["alice"]),
        ];
        let grouped = group_conditions(&conditions);
        assert_eq!(
            grouped["StringEquals"]["aws:username"],
            OneOrMany::Many(vec!["bob".to_string(), "alice".to_string()])
        );
    }

    #[test]
    fn test_distinct_operators_stay_distinct() {
        let conditions = [
            Condition::new("StringEquals", "aws:username", ["alice"]),
            Condition::new("IpAddress", "aws:SourceIp", ["192.168.0.0/16"]),
        ];
        let grouped = group_conditions(&conditions);
        assert_eq!(grouped.len(), 2);
        assert!(grouped.contains_key("StringEquals"));
        assert!(grouped.contains_key("IpAddress"));
    }

    #[test]
    fn test_condition_serialization() {
        let condition = Condition::new("StringEquals", "aws:username", ["alice"]);
        let serialized = serde_json::to_value(&condition).unwrap();
        let deserialized: Condition = serde_json::from_value(serialized).unwrap();
        assert_eq!(condition, deserialized);
    }
}
