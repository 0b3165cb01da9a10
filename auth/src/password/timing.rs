use subtle::ConstantTimeEq;

/// Compare two byte strings without leaking where they differ.
///
/// Returns early only when the lengths differ; equal-length inputs are
/// always compared in full.
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.ct_eq(right).into()
}
