//! Binds the `record_sync` feature files to the step registry.

use crate::fixtures::{SyncContext, sync_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/propagation.feature",
    fixtures = [sync_context: SyncContext]
);
