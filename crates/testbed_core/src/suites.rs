//! Define the registry of test suites the harness knows how to run.
//!
//! This module is the single source of truth for suites: a stable identifier ([`SuiteId`]) plus a const
//! metadata table ([`SUITES`]) recording each suite's name, lifecycle, build parallelism, and the ordered list
//! of test executables.
//!
//! ## Notes
//! - Test lists are authored data. They are never reordered, deduplicated, or filtered at runtime.
//! - The `rm` list runs `rmtest_create_tables` twice on purpose: create, delete, then create again checks that
//!   table re-creation after deletion is well-defined.
//! - Lookup via [`from_str`] is case-sensitive.
//!
//! ## Examples
//! ```rust
//! use testbed_core::suites::{self, SuiteId};
//!
//! assert_eq!(suites::from_str("rbf"), Some(SuiteId::Rbf));
//! assert_eq!(suites::as_str(SuiteId::Rm), "rm");
//! assert_eq!(suites::tests(SuiteId::Rm)[0].as_str(), "rmtest_create_tables");
//! ```

use std::fmt;

use crate::lifecycle::{Lifecycle, Parallelism};

/// Opaque name of one test executable, relative to the workspace directory.
///
/// ## Notes
/// - Equality is by name; two occurrences of the same id in a suite are still two separate invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestId(&'static str);

impl TestId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

/// Stable identifier for every registered suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteId {
    /// Record-based file manager (`rbftest_*`).
    Rbf,
    /// Record manager (`rmtest_*`).
    Rm,
}

/// Metadata for a suite.
#[derive(Debug, Clone, Copy)]
pub struct SuiteInfo {
    pub id: SuiteId,
    pub canonical: &'static str,
    pub description: &'static str,
    pub lifecycle: Lifecycle,
    pub parallelism: Parallelism,
    pub tests: &'static [TestId],
}

const RBF_TESTS: &[TestId] = &[
    TestId::new("rbftest_01"),
    TestId::new("rbftest_02"),
    TestId::new("rbftest_03"),
    TestId::new("rbftest_04"),
    TestId::new("rbftest_05"),
    TestId::new("rbftest_06"),
    TestId::new("rbftest_07"),
    TestId::new("rbftest_08"),
    TestId::new("rbftest_08b"),
    TestId::new("rbftest_09"),
    TestId::new("rbftest_10"),
    TestId::new("rbftest_11"),
    TestId::new("rbftest_12"),
    TestId::new("rbftest_update"),
    TestId::new("rbftest_delete"),
];

const RM_TESTS: &[TestId] = &[
    TestId::new("rmtest_create_tables"),
    TestId::new("rmtest_delete_tables"),
    TestId::new("rmtest_create_tables"),
    TestId::new("rmtest_00"),
    TestId::new("rmtest_01"),
    TestId::new("rmtest_02"),
    TestId::new("rmtest_03"),
    TestId::new("rmtest_04"),
    TestId::new("rmtest_05"),
    TestId::new("rmtest_06"),
    TestId::new("rmtest_07"),
    TestId::new("rmtest_08"),
    TestId::new("rmtest_09"),
    TestId::new("rmtest_10"),
    TestId::new("rmtest_11"),
    TestId::new("rmtest_12"),
    TestId::new("rmtest_13"),
    TestId::new("rmtest_13b"),
    TestId::new("rmtest_14"),
    TestId::new("rmtest_15"),
];

/// Registry of all suites, in display order.
pub const SUITES: &[SuiteInfo] = &[
    SuiteInfo {
        id: SuiteId::Rbf,
        canonical: "rbf",
        description: "record-based file manager",
        lifecycle: Lifecycle::Strict,
        parallelism: Parallelism::Unbounded,
        tests: RBF_TESTS,
    },
    SuiteInfo {
        id: SuiteId::Rm,
        canonical: "rm",
        description: "record manager",
        lifecycle: Lifecycle::Loose,
        parallelism: Parallelism::Serial,
        tests: RM_TESTS,
    },
];

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a bug caught by the guardrail tests).
pub fn info_for(id: SuiteId) -> &'static SuiteInfo {
    SUITES
        .iter()
        .find(|s| s.id == id)
        .expect("INVARIANT: every SuiteId has a registry entry")
}

pub fn as_str(id: SuiteId) -> &'static str {
    info_for(id).canonical
}

/// Ordered test list, duplicates included.
pub fn tests(id: SuiteId) -> &'static [TestId] {
    info_for(id).tests
}

/// Lookup by canonical name.
pub fn from_str(s: &str) -> Option<SuiteId> {
    SUITES.iter().find(|info| info.canonical == s).map(|info| info.id)
}

/// Canonical names of every suite, for "did you mean" style messages.
pub fn names() -> Vec<&'static str> {
    SUITES.iter().map(|info| info.canonical).collect()
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(as_str(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rbf_is_strict_and_parallel() {
        let info = info_for(SuiteId::Rbf);
        assert_eq!(info.lifecycle, Lifecycle::Strict);
        assert_eq!(info.parallelism, Parallelism::Unbounded);
        assert_eq!(info.tests.len(), 15);
        assert_eq!(info.tests.last().map(TestId::as_str), Some("rbftest_delete"));
    }

    #[test]
    fn test_rm_is_loose_and_serial() {
        let info = info_for(SuiteId::Rm);
        assert_eq!(info.lifecycle, Lifecycle::Loose);
        assert_eq!(info.parallelism, Parallelism::Serial);
        assert_eq!(info.tests.len(), 20);
    }

    #[test]
    fn test_unknown_suite() {
        assert_eq!(from_str("ix"), None);
        assert_eq!(from_str("RBF"), None);
    }
}
