//! Content-based hashing for report ids.

use sha2::{Digest, Sha256};

/// SHA-256 over the query list, `k` and the creation timestamp.
pub fn compute_report_id<Q: AsRef<str>>(queries: &[Q], k: usize, created_at: &str) -> String {
    let mut hasher = Sha256::new();

    for query in queries {
        hasher.update(query.as_ref().as_bytes());
        // separator so ["ab"] and ["a", "b"] differ
        hasher.update([0u8]);
    }
    hasher.update(k.to_le_bytes());
    hasher.update(created_at.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATED: &str = "2026-03-02T10:00:00+00:00";

    #[test]
    fn hash_stability() {
        let queries = ["chiller maintenance", "ahu sensor fault codes"];
        let hash1 = compute_report_id(&queries, 4, CREATED);
        let hash2 = compute_report_id(&queries, 4, CREATED);

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = compute_report_id(&["a", "b"], 4, CREATED);

        assert_ne!(base, compute_report_id(&["ab"], 4, CREATED));
        assert_ne!(base, compute_report_id(&["a", "b"], 3, CREATED));
        assert_ne!(base, compute_report_id(&["a", "b"], 4, "2026-03-02T10:00:01+00:00"));
    }
}
