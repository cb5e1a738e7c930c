//! Unit selection: one pure pass over the catalog

use crate::catalog::BuildUnit;
use crate::error::SelectError;
use crate::flags::Flags;
use crate::resolve::{Dependency, ResolvedDependency, Resolver};
use serde::Serialize;
use tracing::{debug, warn};

/// Warning options applied to every activated unit, before any the resolved
/// package exports
pub const BASE_WARN_OPTIONS: &[&str] = &["-Wall", "-Wextra", "-Werror=switch"];

/// One activated unit, with the uniform warning-option set attached
///
/// The option set is carried as an explicit value on each activation record
/// rather than as process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub unit: BuildUnit,
    pub warn_options: Vec<String>,
}

/// A unit left out of the build, with the flags that kept it out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub unit: BuildUnit,
    /// Required flags that were absent or false, in the unit's declared order
    pub missing: Vec<String>,
}

/// The outcome of one selection run
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Activated units, in catalog order
    pub units: Vec<Activation>,
    /// Skipped units, in catalog order (reporting only)
    pub skipped: Vec<Skipped>,
    /// The resolved dependency, if one was located
    pub dependency: Option<ResolvedDependency>,
}

impl Selection {
    /// Number of activated units
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Names of the activated units, in catalog order
    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|a| a.unit.name.as_str())
    }
}

/// Decide which catalog units participate in this build
///
/// Resolution runs first: a required dependency that cannot be located is
/// fatal, and no units are activated. The uniform warning set (the base
/// options plus whatever the resolved package exports) is computed once and
/// attached identically to every activation. Each unit then activates iff
/// every flag it requires is present and true; an absent flag counts as
/// false. Catalog order is preserved throughout.
pub fn select(
    dependency: &Dependency,
    resolver: &dyn Resolver,
    flags: &Flags,
    catalog: &[BuildUnit],
) -> Result<Selection, SelectError> {
    let resolved = match resolver.locate(dependency) {
        Ok(resolved) => {
            debug!(
                package = %resolved.name,
                version = %resolved.version,
                "resolved dependency"
            );
            Some(resolved)
        }
        Err(err) if !dependency.required => {
            warn!(package = %dependency.name, %err, "optional dependency unresolved");
            None
        }
        Err(source) => {
            return Err(SelectError::DependencyUnresolved {
                name: dependency.name.clone(),
                source,
            });
        }
    };

    let mut warn_options: Vec<String> =
        BASE_WARN_OPTIONS.iter().map(|opt| opt.to_string()).collect();
    if let Some(resolved) = &resolved {
        warn_options.extend(resolved.warn_options.iter().cloned());
    }

    let mut selection = Selection {
        dependency: resolved,
        ..Selection::default()
    };

    for unit in catalog {
        let missing: Vec<String> = unit
            .requires
            .iter()
            .filter(|flag| !flags.is_enabled(flag))
            .cloned()
            .collect();

        if missing.is_empty() {
            debug!(unit = %unit.name, "activating unit");
            selection.units.push(Activation {
                unit: unit.clone(),
                warn_options: warn_options.clone(),
            });
        } else {
            debug!(unit = %unit.name, missing = ?missing, "skipping unit");
            selection.skipped.push(Skipped {
                unit: unit.clone(),
                missing,
            });
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{HDF5_ENABLED, MULTI_NODE_NETWORKING_ENABLED};
    use semver::{Version, VersionReq};
    use std::path::PathBuf;

    struct StubResolver {
        fail: bool,
    }

    impl Resolver for StubResolver {
        fn locate(&self, dep: &Dependency) -> Result<ResolvedDependency, crate::ResolveError> {
            if self.fail {
                return Err(crate::ResolveError::NotFound {
                    name: dep.name.clone(),
                    searched: vec![PathBuf::from("/opt/ferrite-rt")],
                });
            }
            Ok(ResolvedDependency {
                name: dep.name.clone(),
                version: Version::new(2, 1, 0),
                root: PathBuf::from("/opt/ferrite-rt"),
                warn_options: vec!["-Wno-deprecated-declarations".to_string()],
            })
        }
    }

    fn dep() -> Dependency {
        Dependency::required("ferrite-rt", VersionReq::parse(">=1.8").unwrap())
    }

    fn abc_catalog() -> Vec<BuildUnit> {
        vec![
            BuildUnit::unconditional("a", "tutorials/a"),
            BuildUnit::requiring("b", "tests/b", &[HDF5_ENABLED]),
            BuildUnit::requiring("c", "tests/c", &[MULTI_NODE_NETWORKING_ENABLED]),
        ]
    }

    #[test]
    fn test_unconditional_unit_survives_all_false_flags() {
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, false);
        flags.set(MULTI_NODE_NETWORKING_ENABLED, false);

        let selection =
            select(&dep(), &StubResolver { fail: false }, &flags, &abc_catalog()).unwrap();
        assert_eq!(selection.unit_names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_absent_flag_skips_unit() {
        // hdf5Enabled true, multiNodeNetworkingEnabled never supplied
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let selection =
            select(&dep(), &StubResolver { fail: false }, &flags, &abc_catalog()).unwrap();
        assert_eq!(selection.unit_names().collect::<Vec<_>>(), vec!["a", "b"]);

        let skipped: Vec<_> = selection.skipped.iter().map(|s| s.unit.name.as_str()).collect();
        assert_eq!(skipped, vec!["c"]);
        assert_eq!(
            selection.skipped[0].missing,
            vec![MULTI_NODE_NETWORKING_ENABLED.to_string()]
        );
    }

    #[test]
    fn test_empty_flag_set_activates_only_unconditional_units() {
        let selection = select(
            &dep(),
            &StubResolver { fail: false },
            &Flags::new(),
            &abc_catalog(),
        )
        .unwrap();
        assert_eq!(selection.unit_names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_multi_flag_unit_needs_every_flag() {
        let catalog = vec![BuildUnit::requiring(
            "both",
            "tests/both",
            &[HDF5_ENABLED, MULTI_NODE_NETWORKING_ENABLED],
        )];

        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);
        flags.set(MULTI_NODE_NETWORKING_ENABLED, false);

        let selection = select(&dep(), &StubResolver { fail: false }, &flags, &catalog).unwrap();
        assert_eq!(selection.unit_count(), 0);
        assert_eq!(
            selection.skipped[0].missing,
            vec![MULTI_NODE_NETWORKING_ENABLED.to_string()]
        );

        flags.set(MULTI_NODE_NETWORKING_ENABLED, true);
        let selection = select(&dep(), &StubResolver { fail: false }, &flags, &catalog).unwrap();
        assert_eq!(selection.unit_names().collect::<Vec<_>>(), vec!["both"]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let first =
            select(&dep(), &StubResolver { fail: false }, &flags, &abc_catalog()).unwrap();
        let second =
            select(&dep(), &StubResolver { fail: false }, &flags, &abc_catalog()).unwrap();

        assert_eq!(first.units, second.units);
        assert_eq!(first.skipped, second.skipped);
    }

    #[test]
    fn test_unresolved_dependency_is_fatal() {
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let err = select(&dep(), &StubResolver { fail: true }, &flags, &abc_catalog())
            .unwrap_err();
        match err {
            SelectError::DependencyUnresolved { name, .. } => assert_eq!(name, "ferrite-rt"),
        }
    }

    #[test]
    fn test_optional_dependency_failure_still_selects() {
        let mut dep = dep();
        dep.required = false;

        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let selection =
            select(&dep, &StubResolver { fail: true }, &flags, &abc_catalog()).unwrap();
        assert_eq!(selection.unit_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(selection.dependency.is_none());
        // Without a resolved package only the base options apply
        assert_eq!(
            selection.units[0].warn_options,
            BASE_WARN_OPTIONS
                .iter()
                .map(|opt| opt.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_warn_options_are_uniform_across_units() {
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let selection =
            select(&dep(), &StubResolver { fail: false }, &flags, &abc_catalog()).unwrap();
        assert_eq!(selection.unit_count(), 2);

        let expected: Vec<String> = BASE_WARN_OPTIONS
            .iter()
            .map(|opt| opt.to_string())
            .chain(std::iter::once("-Wno-deprecated-declarations".to_string()))
            .collect();
        for activation in &selection.units {
            assert_eq!(activation.warn_options, expected);
        }
    }

    #[test]
    fn test_default_catalog_scenario() {
        let mut flags = Flags::new();
        flags.set(HDF5_ENABLED, true);

        let catalog = crate::default_catalog();
        let selection =
            select(&dep(), &StubResolver { fail: false }, &flags, &catalog).unwrap();
        assert_eq!(
            selection.unit_names().collect::<Vec<_>>(),
            vec![
                "hello",
                "tasklib",
                "stencil",
                "circuit",
                "checkpoint-hdf5",
                "attach-hdf5"
            ]
        );
        // dist-checkpoint needs multi-node networking too
        assert!(selection.skipped.iter().any(|s| s.unit.name == "dist-checkpoint"));
    }
}
