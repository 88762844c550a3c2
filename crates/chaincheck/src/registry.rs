//! Test registration.
//!
//! Tests are collected into a [`Registry`] before the run. When the run
//! starts the registry is validated once and frozen into a sorted suite.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use chaincheck_chain::{Flow, TypeRegistry};

use crate::context::TestContext;
use crate::error::InternalError;

/// Where a test is defined and what it is called.
///
/// Ordered by file, then line, then name, so tests in one file run in source
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestIdentity {
    pub file: &'static str,
    pub line: u32,
    pub name: &'static str,
}

impl TestIdentity {
    pub fn new(file: &'static str, line: u32, name: &'static str) -> Self {
        TestIdentity { file, line, name }
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.file, self.line)
    }
}

/// Entry point of a test.
pub type TestFn = fn(&mut TestContext<'_>) -> Flow;

/// A registered test.
#[derive(Clone, Copy)]
pub struct TestCase {
    pub identity: TestIdentity,
    pub entry: TestFn,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Tests collected for a run, in registration order, together with the
/// error types their chains may contain.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
    types: TypeRegistry,
}

/// A validated registry, ready to run.
#[derive(Debug)]
pub(crate) struct Suite {
    /// Tests in run order.
    pub cases: Vec<TestCase>,
    pub types: TypeRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Add a test. Duplicates are reported when the run starts.
    pub fn register(&mut self, identity: TestIdentity, entry: TestFn) -> &mut Self {
        self.cases.push(TestCase { identity, entry });
        self
    }

    /// Make nested causes of type `T` show up under their own name.
    ///
    /// Causes reached through `Error::source()` are only known as
    /// `dyn Error`; without registration they are all named `dyn Error`.
    /// The standard library's error types are registered already.
    pub fn register_error_type<T: Error + 'static>(&mut self) -> &mut Self {
        self.types.register::<T>();
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Validate the registrations and sort them into run order.
    ///
    /// Fails on an empty registry or on two tests sharing file, line and
    /// name.
    pub(crate) fn into_suite(self) -> Result<Suite, InternalError> {
        if self.cases.is_empty() {
            return Err(InternalError::NoTests);
        }

        let mut sorted = BTreeMap::new();
        for case in self.cases {
            match sorted.entry(case.identity) {
                Entry::Vacant(slot) => {
                    slot.insert(case);
                }
                Entry::Occupied(_) => {
                    let TestIdentity { file, line, name } = case.identity;
                    return Err(InternalError::DuplicateTest { file, line, name });
                }
            }
        }

        tracing::debug!(
            tests = sorted.len(),
            error_types = self.types.len(),
            "validated test registry"
        );
        Ok(Suite {
            cases: sorted.into_values().collect(),
            types: self.types,
        })
    }
}
