//! Scalar-or-list rendering for IAM document values.
//!
//! IAM documents render a single-element list as a bare scalar and anything
//! else as an array (`"Action": "s3:GetObject"` vs `"Action": [...]`). The
//! collapsing rule lives here so every emitting site applies it identically.

use serde::{Deserialize, Serialize};

/// A document value that is a bare scalar when there is exactly one element
/// and an array otherwise. Element order is always authoring order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    /// The collapsing rule: exactly one element becomes a scalar.
    fn from(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            OneOrMany::One(values.remove(0))
        } else {
            OneOrMany::Many(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_collapses_to_scalar() {
        let value = OneOrMany::from(vec!["s3:GetObject".to_string()]);
        assert_eq!(value, OneOrMany::One("s3:GetObject".to_string()));
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"s3:GetObject\"");
    }

    #[test]
    fn test_multiple_elements_stay_an_array_in_order() {
        let value = OneOrMany::from(vec!["s3:PutObject".to_string(), "s3:GetObject".to_string()]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "[\"s3:PutObject\",\"s3:GetObject\"]"
        );
    }

    #[test]
    fn test_empty_stays_an_array() {
        let value: OneOrMany<String> = OneOrMany::from(Vec::new());
        assert_eq!(serde_json::to_string(&value).unwrap(), "[]");
        assert!(value.is_empty());
    }

    #[test]
    fn test_deserialize_accepts_both_shapes() {
        let scalar: OneOrMany<String> = serde_json::from_str("\"s3:GetObject\"").unwrap();
        assert_eq!(scalar, OneOrMany::One("s3:GetObject".to_string()));

        let list: OneOrMany<String> = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(list.into_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_iter_covers_both_variants() {
        let one = OneOrMany::One(1);
        assert_eq!(one.iter().copied().collect::<Vec<_>>(), vec![1]);

        let many = OneOrMany::Many(vec![1, 2, 3]);
        assert_eq!(many.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(many.len(), 3);
    }
}
