//! Composite identifier codec for import and cross-resource lookups.
//!
//! Within one identifier string, `:` separates top-level segments and `$`
//! separates a tenant from a user inside a single segment. `$` is never a
//! splitting delimiter here: a tenant-qualified owner like `tenant1$user1`
//! is opaque content of its segment.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

use crate::error::PolicyError;

/// Matches `arn:<partition>:iam:::oidc-provider/<url>` and captures the URL.
static OIDC_PROVIDER_ARN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:[^:]+:iam:::oidc-provider/(.+)$").expect("static OIDC ARN pattern")
});

/// The resource kinds addressed through composite identifiers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    StrumDisplay,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    S3Credential,
    SwiftCredential,
    BucketLink,
    RolePolicy,
    OidcProvider,
}

impl ResourceKind {
    /// The pattern quoted in `InvalidImportFormat` errors.
    pub fn expected_format(&self) -> &'static str {
        match self {
            ResourceKind::S3Credential => "s3:<user-id>:<access-key>",
            ResourceKind::SwiftCredential => "swift:<user-id>:<subuser>",
            ResourceKind::BucketLink => "<bucket> or <bucket>:<owner>",
            ResourceKind::RolePolicy => "<role-name>:<policy-name>",
            ResourceKind::OidcProvider => "arn:<partition>:iam:::oidc-provider/<url> or <url>",
        }
    }
}

/// Reference to an OIDC provider: the full ARN as imported, or a bare URL
/// (an `https://` prefix is stripped at parse time).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OidcProviderRef {
    Arn(String),
    Url(String),
}

impl OidcProviderRef {
    /// The provider URL regardless of which form was imported, so lookups
    /// can match stored providers by URL.
    pub fn url(&self) -> &str {
        match self {
            OidcProviderRef::Arn(arn) => OIDC_PROVIDER_ARN
                .captures(arn)
                .and_then(|captures| captures.get(1))
                .map_or(arn.as_str(), |url| url.as_str()),
            OidcProviderRef::Url(url) => url,
        }
    }
}

/// A parsed composite identifier, tagged by resource kind.
///
/// Values are immutable once parsed; a changed key always produces a new
/// identifier through [`ImportId::parse`] or variant construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ImportId {
    S3Credential { user_id: String, access_key: String },
    SwiftCredential { user_id: String, subuser: String },
    BucketLink { bucket: String, owner: Option<String> },
    RolePolicy { role_name: String, policy_name: String },
    OidcProvider(OidcProviderRef),
}

impl ImportId {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ImportId::S3Credential { .. } => ResourceKind::S3Credential,
            ImportId::SwiftCredential { .. } => ResourceKind::SwiftCredential,
            ImportId::BucketLink { .. } => ResourceKind::BucketLink,
            ImportId::RolePolicy { .. } => ResourceKind::RolePolicy,
            ImportId::OidcProvider(_) => ResourceKind::OidcProvider,
        }
    }

    /// Parse a raw import string against the grammar for `kind`.
    ///
    /// A mismatch fails with `InvalidImportFormat` naming the expected
    /// pattern; there is no best-guess splitting.
    pub fn parse(kind: ResourceKind, raw: &str) -> Result<Self, PolicyError> {
        match kind {
            ResourceKind::S3Credential => {
                parse_credential(kind, raw, "s3").map(|(user_id, access_key)| {
                    ImportId::S3Credential {
                        user_id,
                        access_key,
                    }
                })
            }
            ResourceKind::SwiftCredential => parse_credential(kind, raw, "swift")
                .map(|(user_id, subuser)| ImportId::SwiftCredential { user_id, subuser }),
            ResourceKind::BucketLink => parse_bucket_link(raw),
            ResourceKind::RolePolicy => parse_role_policy(raw),
            ResourceKind::OidcProvider => parse_oidc_provider(raw),
        }
    }

    /// Render the canonical external identifier. Exact inverse of
    /// [`ImportId::parse`] for every kind.
    pub fn render(&self) -> String {
        match self {
            ImportId::S3Credential {
                user_id,
                access_key,
            } => format!("s3:{user_id}:{access_key}"),
            ImportId::SwiftCredential { user_id, subuser } => format!("swift:{user_id}:{subuser}"),
            ImportId::BucketLink {
                bucket,
                owner: Some(owner),
            } => format!("{bucket}:{owner}"),
            ImportId::BucketLink {
                bucket,
                owner: None,
            } => bucket.clone(),
            ImportId::RolePolicy {
                role_name,
                policy_name,
            } => format!("{role_name}:{policy_name}"),
            ImportId::OidcProvider(OidcProviderRef::Arn(arn)) => arn.clone(),
            ImportId::OidcProvider(OidcProviderRef::Url(url)) => url.clone(),
        }
    }
}

impl Display for ImportId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.render())
    }
}

fn invalid(kind: ResourceKind, raw: &str) -> PolicyError {
    PolicyError::InvalidImportFormat {
        kind,
        id: raw.to_string(),
        expected: kind.expected_format().to_string(),
    }
}

fn parse_credential(
    kind: ResourceKind,
    raw: &str,
    scheme: &str,
) -> Result<(String, String), PolicyError> {
    // collect_tuple enforces exactly two colons; extra segments fail.
    let Some((head, user_id, key)) = raw.split(':').collect_tuple() else {
        return Err(invalid(kind, raw));
    };
    if head != scheme || user_id.is_empty() || key.is_empty() {
        return Err(invalid(kind, raw));
    }
    Ok((user_id.to_string(), key.to_string()))
}

fn parse_bucket_link(raw: &str) -> Result<ImportId, PolicyError> {
    let kind = ResourceKind::BucketLink;
    let segments: Vec<&str> = raw.split(':').collect();
    match segments.as_slice() {
        [bucket] if !bucket.is_empty() => Ok(ImportId::BucketLink {
            bucket: (*bucket).to_string(),
            owner: None,
        }),
        [bucket, owner] if !bucket.is_empty() && !owner.is_empty() => Ok(ImportId::BucketLink {
            bucket: (*bucket).to_string(),
            owner: Some((*owner).to_string()),
        }),
        _ => Err(invalid(kind, raw)),
    }
}

fn parse_role_policy(raw: &str) -> Result<ImportId, PolicyError> {
    let kind = ResourceKind::RolePolicy;
    let Some((role_name, policy_name)) = raw.split(':').collect_tuple() else {
        return Err(invalid(kind, raw));
    };
    if role_name.is_empty() || policy_name.is_empty() {
        return Err(invalid(kind, raw));
    }
    Ok(ImportId::RolePolicy {
        role_name: role_name.to_string(),
        policy_name: policy_name.to_string(),
    })
}

fn parse_oidc_provider(raw: &str) -> Result<ImportId, PolicyError> {
    let kind = ResourceKind::OidcProvider;
    if raw.starts_with("arn:") {
        if !OIDC_PROVIDER_ARN.is_match(raw) {
            return Err(invalid(kind, raw));
        }
        return Ok(ImportId::OidcProvider(OidcProviderRef::Arn(
            raw.to_string(),
        )));
    }
    let url = raw.strip_prefix("https://").unwrap_or(raw);
    if url.is_empty() {
        return Err(invalid(kind, raw));
    }
    Ok(ImportId::OidcProvider(OidcProviderRef::Url(
        url.to_string(),
    )))
}
