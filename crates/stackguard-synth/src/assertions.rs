//! Assertions against a synthesized [`Template`].
//!
//! Matching rules:
//! - objects match when every key of the pattern is present in the actual
//!   value and matches recursively (extra actual keys are ignored);
//! - arrays match when lengths are equal and elements match pairwise;
//! - everything else matches by equality.

use serde_json::{Map, Value};

use crate::template::Template;

/// An assertion against a template failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    /// The template has no resource of the requested type.
    #[error("template has no resource of type {resource_type}")]
    NoResourceOfType {
        /// The requested type.
        resource_type: String,
    },

    /// Resources of the type exist, but none matched.
    #[error(
        "none of {candidates} resource(s) of type {resource_type} matched; closest ({logical_id}): {mismatch}"
    )]
    NoMatch {
        /// The requested type.
        resource_type: String,
        /// How many resources of the type were compared.
        candidates: usize,
        /// Resource with the deepest partial match.
        logical_id: String,
        /// Description of the first mismatch in that resource.
        mismatch: String,
    },

    /// The number of resources of a type was not as expected.
    #[error("expected {expected} resource(s) of type {resource_type}, found {actual}")]
    CountMismatch {
        /// The requested type.
        resource_type: String,
        /// Expected count.
        expected: usize,
        /// Actual count.
        actual: usize,
    },
}

/// Where and why a pattern failed to match.
#[derive(Debug)]
struct Mismatch {
    path: String,
    reason: String,
    depth: usize,
}

impl Template {
    /// Assert that some resource of `resource_type` has properties matching
    /// `expected`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stackguard_core::StackEnv;
    /// use stackguard_s3_props::{BucketProps, compute_effective_config};
    /// use stackguard_synth::{Bucket, Stack};
    ///
    /// let mut stack = Stack::new("Doc", StackEnv::default());
    /// Bucket::new(&mut stack, "S3Bucket", &compute_effective_config(&BucketProps::default(), false))
    ///     .unwrap();
    ///
    /// stack
    ///     .synth()
    ///     .has_resource_properties(
    ///         "AWS::S3::Bucket",
    ///         &json!({ "PublicAccessBlockConfiguration": { "BlockPublicAcls": true } }),
    ///     )
    ///     .unwrap();
    /// ```
    pub fn has_resource_properties(
        &self,
        resource_type: &str,
        expected: &Value,
    ) -> Result<(), AssertionError> {
        let candidates = self.find_resources(resource_type);
        if candidates.is_empty() {
            return Err(AssertionError::NoResourceOfType {
                resource_type: resource_type.to_owned(),
            });
        }

        let mut closest: Option<(&str, Mismatch)> = None;
        for (logical_id, resource) in &candidates {
            let actual = Value::Object(resource.properties.clone());
            match match_value(expected, &actual, "Properties", 0) {
                Ok(()) => return Ok(()),
                Err(mismatch) => {
                    let deeper = closest
                        .as_ref()
                        .is_none_or(|(_, best)| mismatch.depth > best.depth);
                    if deeper {
                        closest = Some((*logical_id, mismatch));
                    }
                }
            }
        }

        let Some((logical_id, mismatch)) = closest else {
            return Err(AssertionError::NoResourceOfType {
                resource_type: resource_type.to_owned(),
            });
        };
        tracing::debug!(resource_type, logical_id, path = %mismatch.path, "no matching resource");
        Err(AssertionError::NoMatch {
            resource_type: resource_type.to_owned(),
            candidates: candidates.len(),
            logical_id: logical_id.to_owned(),
            mismatch: format!("at {}: {}", mismatch.path, mismatch.reason),
        })
    }

    /// Assert the number of resources of `resource_type`.
    pub fn resource_count_is(
        &self,
        resource_type: &str,
        expected: usize,
    ) -> Result<(), AssertionError> {
        let actual = self.find_resources(resource_type).len();
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::CountMismatch {
                resource_type: resource_type.to_owned(),
                expected,
                actual,
            })
        }
    }
}

fn match_value(pattern: &Value, actual: &Value, path: &str, depth: usize) -> Result<(), Mismatch> {
    match (pattern, actual) {
        (Value::Object(pattern), Value::Object(actual)) => match_object(pattern, actual, path, depth),
        (Value::Array(pattern), Value::Array(actual)) => {
            if pattern.len() != actual.len() {
                return Err(Mismatch {
                    path: path.to_owned(),
                    reason: format!(
                        "expected array of length {}, found length {}",
                        pattern.len(),
                        actual.len()
                    ),
                    depth,
                });
            }
            for (i, (p, a)) in pattern.iter().zip(actual).enumerate() {
                match_value(p, a, &format!("{path}[{i}]"), depth + 1)?;
            }
            Ok(())
        }
        (p, a) if p == a => Ok(()),
        (p, a) => Err(Mismatch {
            path: path.to_owned(),
            reason: format!("expected {p}, found {a}"),
            depth,
        }),
    }
}

fn match_object(
    pattern: &Map<String, Value>,
    actual: &Map<String, Value>,
    path: &str,
    depth: usize,
) -> Result<(), Mismatch> {
    for (key, expected) in pattern {
        let child_path = format!("{path}.{key}");
        let Some(found) = actual.get(key) else {
            return Err(Mismatch {
                path: child_path,
                reason: "missing key".to_owned(),
                depth,
            });
        };
        match_value(expected, found, &child_path, depth + 1)?;
    }
    Ok(())
}
