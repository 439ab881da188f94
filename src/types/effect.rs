//! Allow/Deny effect for policy statements.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// The effect of a policy statement, serialized as the IAM literals
/// `"Allow"` and `"Deny"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
pub enum Effect {
    Allow,
    Deny,
}
