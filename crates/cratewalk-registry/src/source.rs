//! The boundary between the graph builder and wherever dependency lists come from.

use cratewalk_util::errors::CratewalkResult;

/// Something that can list a package's direct, normal (runtime) dependencies.
///
/// Build-time and dev-only dependencies must already be excluded. The order of
/// the returned list is preserved by the graph builder.
pub trait DependencySource {
    fn direct_dependencies(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> CratewalkResult<Vec<String>>;
}

impl<T: DependencySource + ?Sized> DependencySource for &T {
    fn direct_dependencies(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> CratewalkResult<Vec<String>> {
        (**self).direct_dependencies(package, version)
    }
}

impl<T: DependencySource + ?Sized> DependencySource for Box<T> {
    fn direct_dependencies(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> CratewalkResult<Vec<String>> {
        (**self).direct_dependencies(package, version)
    }
}
