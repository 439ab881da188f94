//! Principal blocks and their rendered document form.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use utoipa::ToSchema;

use super::one_or_many::OneOrMany;

/// The principal types an IAM-style statement can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString)]
pub enum PrincipalType {
    #[serde(rename = "AWS")]
    #[strum(serialize = "AWS")]
    Aws,
    Federated,
    Service,
    CanonicalUser,
    /// The special `"*"` principal (any principal).
    #[serde(rename = "*")]
    #[strum(serialize = "*")]
    Wildcard,
}

impl PrincipalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::Aws => "AWS",
            PrincipalType::Federated => "Federated",
            PrincipalType::Service => "Service",
            PrincipalType::CanonicalUser => "CanonicalUser",
            PrincipalType::Wildcard => "*",
        }
    }
}

impl Display for PrincipalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// One principal block: a type plus its identifier list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Principal {
    principal_type: PrincipalType,
    identifiers: Vec<String>,
}

impl Principal {
    pub fn new(
        principal_type: PrincipalType,
        identifiers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            principal_type,
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// The `"*"` (any principal) block.
    pub fn wildcard() -> Self {
        Self {
            principal_type: PrincipalType::Wildcard,
            identifiers: Vec::new(),
        }
    }

    pub fn principal_type(&self) -> PrincipalType {
        self.principal_type
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

/// The rendered `Principal`/`NotPrincipal` value: the bare string `"*"` for
/// the wildcard principal, otherwise a type → identifiers mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PrincipalSpec {
    Wildcard(String),
    Typed(BTreeMap<String, OneOrMany<String>>),
}

impl PrincipalSpec {
    /// Merge principal blocks into the rendered form.
    ///
    /// Blocks sharing a type concatenate their identifier lists in input
    /// order; nothing is de-duplicated. A wildcard block anywhere renders
    /// the whole value as `"*"`.
    pub fn from_blocks(blocks: &[Principal]) -> Option<Self> {
        if blocks.is_empty() {
            return None;
        }
        if blocks
            .iter()
            .any(|block| block.principal_type == PrincipalType::Wildcard)
        {
            return Some(PrincipalSpec::Wildcard("*".to_string()));
        }

        let merged: BTreeMap<String, OneOrMany<String>> = blocks
            .iter()
            .map(|block| (block.principal_type.to_string(), block.identifiers.clone()))
            .into_group_map()
            .into_iter()
            .map(|(principal_type, lists)| {
                let identifiers: Vec<String> = lists.into_iter().flatten().collect();
                (principal_type, OneOrMany::from(identifiers))
            })
            .collect();

        Some(PrincipalSpec::Typed(merged))
    }
}
