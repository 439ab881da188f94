//! Data model types for policy statements and rendered documents.
//!
//! The authoring model (`Statement`, `Principal`, `Condition`) mirrors the
//! configuration blocks the provider exposes; the wire model
//! (`PolicyDocument`, `RenderedStatement`) mirrors the IAM-style JSON the
//! RGW Admin API accepts.

mod condition;
mod effect;
mod one_or_many;
mod policy;
mod principal;
mod statement;

pub use condition::{Condition, ConditionMap, group_conditions};
pub use effect::Effect;
pub use one_or_many::OneOrMany;
pub use policy::{POLICY_VERSION, PolicyDocument, RenderedStatement};
pub use principal::{Principal, PrincipalSpec, PrincipalType};
pub use statement::Statement;
