//! Fallible allocation of working storage.

use std::collections::TryReserveError;

/// Returns an empty vector with room for exactly `len` elements.
pub(crate) fn with_capacity<T>(len: usize) -> Result<Vec<T>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    Ok(buffer)
}

/// Copies a slice into freshly reserved storage.
pub(crate) fn copy(values: &[f64]) -> Result<Vec<f64>, TryReserveError> {
    let mut buffer = with_capacity(values.len())?;
    buffer.extend_from_slice(values);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserves_requested_capacity() {
        let buffer: Vec<f64> = with_capacity(7).expect("small allocation");
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 7);
    }

    #[test]
    fn reports_impossible_allocation() {
        assert!(with_capacity::<f64>(usize::MAX).is_err());
    }

    #[test]
    fn copy_preserves_values() {
        let copied = copy(&[1.0, 2.5, -3.0]).expect("small allocation");
        assert_eq!(copied, vec![1.0, 2.5, -3.0]);
    }
}
