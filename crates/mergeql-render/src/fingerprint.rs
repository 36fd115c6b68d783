//! BLAKE3 fingerprints of rendered fragments.
//!
//! Rendering is deterministic, so equal configurations always share a
//! fingerprint. Used to correlate log lines and executed statements without
//! logging query text.

/// Hex-encoded BLAKE3 hash of a rendered fragment.
pub fn fingerprint(fragment: &str) -> String {
    blake3::hash(fragment.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MergeClause, MultiPropertyAssignment, PropertyAssignment};

    #[test]
    fn equal_configs_share_fingerprint() {
        let build = || {
            MergeClause::new("(n:Host {id: $id})")
                .on_create(PropertyAssignment::replace("n", "$props"))
                .on_match(
                    MultiPropertyAssignment::new("n")
                        .with_member("b", 2)
                        .with_member("a", 1),
                )
        };
        let a = fingerprint(&build().render().unwrap());
        let b = fingerprint(&build().render().unwrap());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn different_fragments_differ() {
        assert_ne!(fingerprint("test"), fingerprint("test "));
    }
}
