/// Substring filter that excludes matching package identifiers from a walk.
///
/// An empty substring is the same as no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    substring: Option<String>,
}

impl PackageFilter {
    pub fn new(substring: Option<&str>) -> Self {
        Self {
            substring: substring.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if `package` contains the filter substring.
    pub fn excludes(&self, package: &str) -> bool {
        self.substring
            .as_deref()
            .is_some_and(|needle| package.contains(needle))
    }
}
