//! Logical id allocation.
//!
//! A resource's logical id is its construct path made template-safe: the
//! alphanumeric characters of each path component, followed by the first 8
//! hex digits (uppercase) of the MD5 of the full path. The hash keeps ids
//! unique when two paths collapse to the same human-readable part.

use md5::{Digest, Md5};

/// Path component hidden from both the hash and the human-readable part.
const HIDDEN_ID: &str = "Default";

/// Path component hidden from the human-readable part only.
const HIDDEN_FROM_HUMAN_ID: &str = "Resource";

/// Upper bound for the human-readable part.
const MAX_HUMAN_LEN: usize = 240;

/// Length of the hash suffix.
const HASH_LEN: usize = 8;

/// Compute the logical id for a construct path (stack-relative).
///
/// # Examples
///
/// ```
/// use stackguard_synth::logical_id::logical_id;
///
/// let id = logical_id(&["S3Bucket", "Resource"]);
/// assert!(id.starts_with("S3Bucket"));
/// assert_eq!(id.len(), "S3Bucket".len() + 8);
/// ```
#[must_use]
pub fn logical_id<S: AsRef<str>>(components: &[S]) -> String {
    let components: Vec<&str> = components
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| *c != HIDDEN_ID)
        .collect();

    if components.len() == 1 {
        let candidate = remove_non_alphanumeric(components[0]);
        if !candidate.is_empty() && candidate.len() <= MAX_HUMAN_LEN {
            return candidate;
        }
    }

    let hash = path_hash(&components);

    let mut human = String::new();
    let mut previous: Option<&str> = None;
    for component in &components {
        // Consecutive duplicates ("Bucket/Bucket") only contribute once.
        if previous == Some(*component) {
            continue;
        }
        previous = Some(*component);
        if *component == HIDDEN_FROM_HUMAN_ID {
            continue;
        }
        human.push_str(&remove_non_alphanumeric(component));
    }
    human.truncate(MAX_HUMAN_LEN);

    format!("{human}{hash}")
}

fn path_hash(components: &[&str]) -> String {
    let digest = Md5::digest(components.join("/").as_bytes());
    let mut hash = hex::encode_upper(digest);
    hash.truncate(HASH_LEN);
    hash
}

fn remove_non_alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}
