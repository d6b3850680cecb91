use crate::error::LoadError;

/// Sorted ids must be exactly `1..=N`. Reports the first position that breaks the run.
pub fn check_series(ids: &[i64]) -> Result<(), LoadError> {
    for (index, &actual) in ids.iter().enumerate() {
        let expected = index as i64 + 1;
        if actual != expected {
            return Err(LoadError::Series { expected, actual });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_series;
    use crate::error::LoadError;

    #[test]
    fn contiguous_series_is_ok() {
        assert!(check_series(&[]).is_ok());
        assert!(check_series(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn gap_reports_expected_and_actual() {
        let err = check_series(&[1, 2, 4]).unwrap_err();
        assert_eq!(err, LoadError::Series { expected: 3, actual: 4 });
    }

    #[test]
    fn duplicate_is_rejected() {
        let err = check_series(&[1, 2, 2, 3]).unwrap_err();
        assert_eq!(err, LoadError::Series { expected: 3, actual: 2 });
    }

    #[test]
    fn series_must_start_at_one() {
        let err = check_series(&[2, 3]).unwrap_err();
        assert_eq!(err, LoadError::Series { expected: 1, actual: 2 });

        let err = check_series(&[0, 1]).unwrap_err();
        assert_eq!(err, LoadError::Series { expected: 1, actual: 0 });
    }
}
