//! Authoring model for policy statements.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PolicyError;

use super::condition::Condition;
use super::effect::Effect;
use super::principal::{Principal, PrincipalType};

/// One access-control rule, built from configuration blocks.
///
/// Invariants are checked by [`Statement::validate`] at compile time, not at
/// construction, so partially built statements can flow through builders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Statement {
    sid: Option<String>,
    effect: Effect,
    principals: Vec<Principal>,
    not_principals: Vec<Principal>,
    actions: Vec<String>,
    not_actions: Vec<String>,
    resources: Vec<String>,
    not_resources: Vec<String>,
    conditions: Vec<Condition>,
}

impl Statement {
    pub fn new(effect: Effect) -> Self {
        Self {
            sid: None,
            effect,
            principals: Vec::new(),
            not_principals: Vec::new(),
            actions: Vec::new(),
            not_actions: Vec::new(),
            resources: Vec::new(),
            not_resources: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn allow() -> Self {
        Self::new(Effect::Allow)
    }

    pub fn deny() -> Self {
        Self::new(Effect::Deny)
    }

    /// Set the statement id. An unset Sid is omitted from the rendered
    /// document; uniqueness across statements is the author's concern.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principals.push(principal);
        self
    }

    pub fn with_not_principal(mut self, principal: Principal) -> Self {
        self.not_principals.push(principal);
        self
    }

    pub fn with_actions(
        mut self,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn with_not_actions(
        mut self,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.not_actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn with_resources(
        mut self,
        resources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.resources.extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn with_not_resources(
        mut self,
        resources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.not_resources
            .extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn principals(&self) -> &[Principal] {
        &self.principals
    }

    pub fn not_principals(&self) -> &[Principal] {
        &self.not_principals
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn not_actions(&self) -> &[String] {
        &self.not_actions
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn not_resources(&self) -> &[String] {
        &self.not_resources
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Check the statement's structural invariants.
    ///
    /// `actions`/`not_actions`, `resources`/`not_resources` and
    /// `principals`/`not_principals` are mutually exclusive, one of
    /// `actions`/`not_actions` must be populated, and every non-wildcard
    /// principal block needs at least one identifier.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.actions.is_empty() && !self.not_actions.is_empty() {
            return Err(PolicyError::InvalidStatement(
                "actions and not_actions are mutually exclusive".to_string(),
            ));
        }
        if !self.resources.is_empty() && !self.not_resources.is_empty() {
            return Err(PolicyError::InvalidStatement(
                "resources and not_resources are mutually exclusive".to_string(),
            ));
        }
        if !self.principals.is_empty() && !self.not_principals.is_empty() {
            return Err(PolicyError::InvalidStatement(
                "principals and not_principals are mutually exclusive".to_string(),
            ));
        }
        if self.actions.is_empty() && self.not_actions.is_empty() {
            return Err(PolicyError::InvalidStatement(
                "a statement must declare actions or not_actions".to_string(),
            ));
        }
        for principal in self.principals.iter().chain(&self.not_principals) {
            if principal.principal_type() != PrincipalType::Wildcard
                && principal.identifiers().is_empty()
            {
                return Err(PolicyError::InvalidStatement(format!(
                    "principal block of type {} has no identifiers",
                    principal.principal_type()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_allow_statement_is_valid() {
        let statement = Statement::allow()
            .with_actions(["s3:GetObject"])
            .with_resources(["arn:aws:s3:::b/*"]);
        assert!(statement.validate().is_ok());
        assert_eq!(statement.effect(), Effect::Allow);
        assert_eq!(statement.sid(), None);
    }

    #[test]
    fn test_actions_and_not_actions_are_mutually_exclusive() {
        let statement = Statement::allow()
            .with_actions(["s3:GetObject"])
            .with_not_actions(["s3:PutObject"]);
        let err = statement.validate().unwrap_err();
        assert!(matches!(err, PolicyError::InvalidStatement(_)));
        assert!(err.to_string().contains("not_actions"));
    }

    #[test]
    fn test_resources_and_not_resources_are_mutually_exclusive() {
        let statement = Statement::deny()
            .with_actions(["s3:*"])
            .with_resources(["arn:aws:s3:::a"])
            .with_not_resources(["arn:aws:s3:::b"]);
        assert!(statement.validate().is_err());
    }

    #[test]
    fn test_principals_and_not_principals_are_mutually_exclusive() {
        let statement = Statement::allow()
            .with_actions(["s3:GetObject"])
            .with_principal(Principal::wildcard())
            .with_not_principal(Principal::new(
                PrincipalType::Aws,
                ["arn:aws:iam:::user/alice"],
            ));
        assert!(statement.validate().is_err());
    }

    #[test]
    fn test_statement_without_actions_is_rejected() {
        let statement = Statement::allow().with_resources(["arn:aws:s3:::b/*"]);
        let err = statement.validate().unwrap_err();
        assert!(err.to_string().contains("actions or not_actions"));
    }

    #[test]
    fn test_not_actions_alone_is_accepted() {
        let statement = Statement::deny()
            .with_not_actions(["s3:GetObject"])
            .with_resources(["arn:aws:s3:::b/*"]);
        assert!(statement.validate().is_ok());
    }

    #[test]
    fn test_empty_principal_block_is_rejected() {
        let statement = Statement::allow()
            .with_actions(["sts:AssumeRole"])
            .with_principal(Principal::new(PrincipalType::Aws, Vec::<String>::new()));
        let err = statement.validate().unwrap_err();
        assert!(err.to_string().contains("no identifiers"));
    }

    #[test]
    fn test_wildcard_principal_needs_no_identifiers() {
        let statement = Statement::allow()
            .with_actions(["s3:GetObject"])
            .with_resources(["arn:aws:s3:::b/*"])
            .with_principal(Principal::wildcard());
        assert!(statement.validate().is_ok());
    }

    #[test]
    fn test_statement_serialization() {
        let statement = Statement::allow()
            .with_sid("ReadOnly")
            .with_actions(["s3:GetObject"])
            .with_resources(["arn:aws:s3:::b/*"])
            .with_condition(Condition::new("StringEquals", "aws:username", ["alice"]));
        let serialized = serde_json::to_value(&statement).unwrap();
        let deserialized: Statement = serde_json::from_value(serialized).unwrap();
        assert_eq!(statement, deserialized);
    }
}
