//! Wire-format model of a rendered access-policy document.

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyTextOrigin};

use super::condition::ConditionMap;
use super::effect::Effect;
use super::one_or_many::OneOrMany;
use super::principal::PrincipalSpec;

/// The fixed IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// One statement in IAM document form. Keys are emitted only when populated;
/// field order matches IAM document conventions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RenderedStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<PrincipalSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_principal: Option<PrincipalSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_action: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_resource: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionMap>,
}

/// A complete versioned policy document. Statement order is authoring order
/// and is semantically significant; nothing here reorders it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    #[serde(default = "default_version")]
    pub version: String,
    pub statement: Vec<RenderedStatement>,
}

fn default_version() -> String {
    POLICY_VERSION.to_string()
}

impl PolicyDocument {
    pub fn new(statement: Vec<RenderedStatement>) -> Self {
        Self {
            version: default_version(),
            statement,
        }
    }

    /// Parse a document from JSON text, tagging parse failures with where
    /// the text came from.
    pub fn from_json(text: &str, origin: PolicyTextOrigin) -> Result<Self, PolicyError> {
        serde_json::from_str(text).map_err(|err| PolicyError::MalformedPolicy {
            origin,
            reason: err.to_string(),
        })
    }

    /// Serialize compactly, `Version` first.
    pub fn to_json(&self) -> Result<String, PolicyError> {
        serde_json::to_string(self).map_err(|err| PolicyError::SerializeError(err.to_string()))
    }
}
