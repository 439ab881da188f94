//! Canonical JSON normalization for policy-shaped attributes.
//!
//! Terraform reports a diff whenever stored state and the freshly read API
//! value differ byte-for-byte, so every policy attribute is passed through
//! [`normalize`] before it is persisted or compared. The canonical form is
//! insertion-order independent for object keys but never reorders arrays:
//! statement order is semantically significant.

use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PolicyError, PolicyTextOrigin};

/// Normalize JSON policy text from configuration into its canonical form.
///
/// Object keys are emitted in lexicographic order at every nesting level,
/// array element order is preserved exactly, no extraneous whitespace is
/// emitted, and numeric lexemes are carried through verbatim (`1.0` stays
/// `1.0`). The transform is idempotent.
pub fn normalize(raw: &str) -> Result<String, PolicyError> {
    normalize_with_origin(raw, PolicyTextOrigin::Configuration)
}

/// Normalize a policy document returned by the RGW Admin API.
///
/// Some server versions return the document percent-encoded, others do not.
/// The text is percent-decoded first; if decoding does not yield valid
/// UTF-8, the raw text is treated as already decoded and normalization
/// proceeds best-effort.
pub fn normalize_api_text(raw: &str) -> Result<String, PolicyError> {
    let decoded = match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            warn!(
                event = "Normalize",
                phase = "Decode",
                error = %err,
                "percent-decoding failed, treating API response as already decoded"
            );
            raw.to_string()
        }
    };
    normalize_with_origin(&decoded, PolicyTextOrigin::RemoteApi)
}

/// Compare a configured policy against a freshly read API value, after
/// normalizing both sides. This is the diff-suppression predicate resource
/// handlers call on every read.
pub fn policies_equivalent(configured: &str, remote: &str) -> Result<bool, PolicyError> {
    Ok(normalize(configured)? == normalize_api_text(remote)?)
}

fn normalize_with_origin(raw: &str, origin: PolicyTextOrigin) -> Result<String, PolicyError> {
    let tree: Value = serde_json::from_str(raw).map_err(|err| PolicyError::MalformedPolicy {
        origin,
        reason: err.to_string(),
    })?;

    debug!(event = "Normalize", phase = "Serialize", bytes = raw.len());

    // serde_json's default Map is a BTreeMap, so re-serializing the parsed
    // tree emits keys lexicographically at every level; arrays keep their
    // element order and (with arbitrary_precision) numbers keep their lexeme.
    serde_json::to_string(&tree).map_err(|err| PolicyError::SerializeError(err.to_string()))
}
