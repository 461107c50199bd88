//! Determinism checks: the same job must produce byte-identical output.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run.
    pub hash: String,
    /// Index of the first run whose output differed, if any.
    pub first_mismatch: Option<usize>,
}

/// Computes the BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate` `runs` times and compares the outputs.
pub fn verify_determinism<F>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Vec<u8>,
{
    assert!(runs >= 2, "need at least two runs to compare");
    let first = generate();
    let hash = compute_hash(&first);
    let first_mismatch = (1..runs).find(|_| generate() != first);
    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash,
        first_mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_nondeterminism() {
        let mut n = 0u8;
        let result = verify_determinism(
            || {
                n += 1;
                vec![n.min(2)]
            },
            4,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.first_mismatch, Some(1));

        let result = verify_determinism(|| vec![7, 7, 7], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.hash, compute_hash(&[7, 7, 7]));
    }
}
