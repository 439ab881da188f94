// src/lib.rs
pub use compiler::compile;
pub use error::{PolicyError, PolicyTextOrigin};
pub use identifier::{ImportId, OidcProviderRef, ResourceKind};
pub use normalizer::{normalize, normalize_api_text, policies_equivalent};
pub use types::{
    Condition, ConditionMap, Effect, OneOrMany, POLICY_VERSION, PolicyDocument, Principal,
    PrincipalSpec, PrincipalType, RenderedStatement, Statement,
};

mod compiler;
mod error;
mod identifier;
mod normalizer;
mod types;
