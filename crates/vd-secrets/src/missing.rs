//! Aggregated reporting of missing configuration values.

use crate::description::ConfigDescription;

/// One or more required configuration values absent from the raw
/// mapping.
///
/// Always carries at least one descriptor. Callers resolving several
/// values merge failures with [`MissingConfigValues::combine`] (or the
/// [`gather2`]/[`gather3`] helpers) so an operator sees every gap in a
/// single report instead of discovering them one trial run at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingConfigValues {
    descriptions: Vec<ConfigDescription>,
}

impl MissingConfigValues {
    /// Build the error from the missing addresses.
    ///
    /// Panics when `descriptions` is empty: an empty aggregate is a
    /// defect in the caller, not a reportable condition.
    pub fn new(descriptions: Vec<ConfigDescription>) -> Self {
        assert!(
            !descriptions.is_empty(),
            "must have at least 1 description to build the error"
        );
        Self { descriptions }
    }

    /// Build the error for a single missing address.
    pub fn single(description: ConfigDescription) -> Self {
        Self::new(vec![description])
    }

    /// The missing addresses, in encounter order.
    ///
    /// Duplicates are preserved: an address reported by two failures
    /// lists twice.
    pub fn descriptions(&self) -> &[ConfigDescription] {
        &self.descriptions
    }

    /// Merge several errors into one, preserving encounter order.
    ///
    /// Panics when `errors` yields nothing, matching the non-empty
    /// invariant of [`MissingConfigValues::new`].
    pub fn combine(errors: impl IntoIterator<Item = MissingConfigValues>) -> MissingConfigValues {
        let descriptions: Vec<ConfigDescription> = errors
            .into_iter()
            .flat_map(|error| error.descriptions)
            .collect();
        Self::new(descriptions)
    }
}

impl std::fmt::Display for MissingConfigValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing the following configuration:")?;
        for description in &self.descriptions {
            write!(f, "\n  {}", description)?;
        }
        Ok(())
    }
}

impl std::error::Error for MissingConfigValues {}

/// Combine two independent resolutions, keeping every failure.
///
/// Succeeds only when both inputs succeed; when both fail the
/// resulting error carries the descriptors of both, left first.
pub fn gather2<A, B>(
    a: Result<A, MissingConfigValues>,
    b: Result<B, MissingConfigValues>,
) -> Result<(A, B), MissingConfigValues> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
        (Err(left), Err(right)) => Err(MissingConfigValues::combine([left, right])),
    }
}

/// Three-way [`gather2`].
pub fn gather3<A, B, C>(
    a: Result<A, MissingConfigValues>,
    b: Result<B, MissingConfigValues>,
    c: Result<C, MissingConfigValues>,
) -> Result<(A, B, C), MissingConfigValues> {
    let ((a, b), c) = gather2(gather2(a, b), c)?;
    Ok((a, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(scope: &str, key: &str) -> ConfigDescription {
        ConfigDescription::new(scope, key)
    }

    #[test]
    #[should_panic(expected = "at least 1 description")]
    fn test_empty_aggregate_panics() {
        let _ = MissingConfigValues::new(Vec::new());
    }

    #[test]
    fn test_combine_flattens_in_encounter_order() {
        let a = MissingConfigValues::new(vec![desc("s1", "k1"), desc("s1", "k2")]);
        let b = MissingConfigValues::single(desc("s2", "k1"));
        let combined = MissingConfigValues::combine([a, b]);
        assert_eq!(
            combined.descriptions(),
            &[desc("s1", "k1"), desc("s1", "k2"), desc("s2", "k1")]
        );
    }

    #[test]
    fn test_combine_preserves_duplicates() {
        let a = MissingConfigValues::single(desc("s", "k"));
        let b = MissingConfigValues::single(desc("s", "k"));
        let combined = MissingConfigValues::combine([a, b]);
        assert_eq!(combined.descriptions().len(), 2);
    }

    #[test]
    fn test_display_one_descriptor_per_line() {
        let error = MissingConfigValues::new(vec![desc("together", "api_key"), desc("creds", "org")]);
        let rendered = format!("{}", error);
        assert_eq!(
            rendered,
            "missing the following configuration:\n  together.api_key\n  creds.org"
        );
    }

    #[test]
    fn test_display_is_stable() {
        let error = MissingConfigValues::single(desc("a", "b"));
        assert_eq!(format!("{}", error), format!("{}", error.clone()));
    }

    #[test]
    fn test_gather2_both_missing() {
        let a: Result<(), _> = Err(MissingConfigValues::single(desc("s", "k1")));
        let b: Result<(), _> = Err(MissingConfigValues::single(desc("s", "k2")));
        let error = gather2(a, b).unwrap_err();
        assert_eq!(error.descriptions(), &[desc("s", "k1"), desc("s", "k2")]);
    }

    #[test]
    fn test_gather2_single_failure_passes_through() {
        let error = MissingConfigValues::single(desc("s", "k"));
        let result = gather2(Ok(1u32), Err::<u32, _>(error.clone()));
        assert_eq!(result.unwrap_err(), error);
    }

    #[test]
    fn test_gather3_collects_all() {
        let a: Result<(), _> = Err(MissingConfigValues::single(desc("s", "k1")));
        let b: Result<(), _> = Ok(());
        let c: Result<(), _> = Err(MissingConfigValues::single(desc("s", "k3")));
        let error = gather3(a, b, c).unwrap_err();
        assert_eq!(error.descriptions(), &[desc("s", "k1"), desc("s", "k3")]);
    }
}
