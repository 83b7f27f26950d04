//! Shared fixtures for the behavioural scenarios.

use record_sync::{SyncResult, Synchronizer};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::fixtures::{MirrorNode, Node, User};

/// Scenario state shared between the propagation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct SyncContext {
    /// Record values are read from.
    pub source: Slot<User>,
    /// Record values are written to.
    pub destination: Slot<User>,
    /// Policies and options accumulated by the `Given` steps.
    pub sync: Slot<Synchronizer>,
    /// Linked chain used by the nesting scenarios.
    pub chain: Slot<Node>,
    /// Destination of a chain copy.
    pub mirror: Slot<MirrorNode>,
    /// Names returned by the last diff.
    pub diff: Slot<Vec<String>>,
    /// Outcome of the last propagation.
    pub outcome: Slot<SyncResult<()>>,
}

impl SyncContext {
    /// Apply `update` to the synchronizer, starting from an empty one.
    pub fn configure<F>(&self, update: F)
    where
        F: FnOnce(Synchronizer) -> Synchronizer,
    {
        let sync = self.sync.take().unwrap_or_default();
        self.sync.set(update(sync));
    }
}

/// Creates an empty context for each scenario.
#[fixture]
pub fn sync_context() -> SyncContext {
    SyncContext::default()
}
