//! Step definitions for the propagation scenarios.

use crate::fixtures::SyncContext;
use anyhow::{Result, anyhow, ensure};
use record_sync::{CoerceError, SyncError};
use rstest_bdd_macros::{given, then, when};
use test_helpers::fixtures::{MirrorNode, User, chain, mirror_len};
use test_helpers::text::{field_list, normalize_scalar, parse_int};

fn user(id: &str, name: &str, age: &str) -> Result<User> {
    Ok(User::new(parse_int(id)?, &normalize_scalar(name), parse_int(age)?))
}

#[given("a source user {id} named {name} aged {age}")]
fn source_user(sync_context: &SyncContext, id: String, name: String, age: String) -> Result<()> {
    ensure!(sync_context.source.is_empty(), "source already initialised");
    sync_context.source.set(user(&id, &name, &age)?);
    Ok(())
}

#[given("a destination user {id} named {name} aged {age}")]
fn destination_user(
    sync_context: &SyncContext,
    id: String,
    name: String,
    age: String,
) -> Result<()> {
    ensure!(
        sync_context.destination.is_empty(),
        "destination already initialised"
    );
    sync_context.destination.set(user(&id, &name, &age)?);
    Ok(())
}

#[given("the fields {names} are ignored")]
fn ignore_fields(sync_context: &SyncContext, names: String) {
    sync_context.configure(|sync| sync.ignore(field_list(&names)));
}

#[given("only default destination fields are selected")]
fn only_default_destinations(sync_context: &SyncContext) {
    sync_context.configure(record_sync::Synchronizer::only_default_destinations);
}

#[given("default source fields are skipped")]
fn skip_default_sources(sync_context: &SyncContext) {
    sync_context.configure(record_sync::Synchronizer::skip_default_sources);
}

#[given("only changed fields are selected")]
fn only_changed(sync_context: &SyncContext) {
    sync_context.configure(record_sync::Synchronizer::only_changed);
}

fn count(value: &str) -> Result<usize> {
    Ok(usize::try_from(parse_int(value)?)?)
}

#[given("a chain of {len} nodes")]
fn chain_of(sync_context: &SyncContext, len: String) -> Result<()> {
    sync_context.chain.set(chain(count(&len)?));
    Ok(())
}

#[given("a nesting limit of {limit} levels")]
fn nesting_limit(sync_context: &SyncContext, limit: String) -> Result<()> {
    let levels = count(&limit)?;
    sync_context.configure(|sync| {
        let options = sync.options().clone().with_max_depth(levels);
        sync.with_options(options)
    });
    Ok(())
}

#[when("the source is propagated into the destination")]
fn propagate_users(sync_context: &SyncContext) -> Result<()> {
    let source = sync_context
        .source
        .take()
        .ok_or_else(|| anyhow!("source user missing"))?;
    let mut destination = sync_context
        .destination
        .take()
        .ok_or_else(|| anyhow!("destination user missing"))?;
    let sync = sync_context.sync.take().unwrap_or_default();
    sync.propagate(&source, &mut destination)?;
    sync_context.destination.set(destination);
    Ok(())
}

#[when("the records are diffed")]
fn diff_users(sync_context: &SyncContext) -> Result<()> {
    let source = sync_context
        .source
        .take()
        .ok_or_else(|| anyhow!("source user missing"))?;
    let destination = sync_context
        .destination
        .take()
        .ok_or_else(|| anyhow!("destination user missing"))?;
    let sync = sync_context.sync.take().unwrap_or_default();
    sync_context.diff.set(sync.diff(&source, &destination));
    Ok(())
}

#[when("the chain is propagated into a mirror")]
fn propagate_chain(sync_context: &SyncContext) -> Result<()> {
    let source = sync_context
        .chain
        .take()
        .ok_or_else(|| anyhow!("chain missing"))?;
    let sync = sync_context.sync.take().unwrap_or_default();
    let mut mirror = MirrorNode::default();
    sync_context
        .outcome
        .set(sync.propagate(&source, &mut mirror));
    sync_context.mirror.set(mirror);
    Ok(())
}

#[then("the destination is user {id} named {name} aged {age}")]
fn assert_destination(
    sync_context: &SyncContext,
    id: String,
    name: String,
    age: String,
) -> Result<()> {
    let expected = user(&id, &name, &age)?;
    let actual = sync_context
        .destination
        .take()
        .ok_or_else(|| anyhow!("destination user missing"))?;
    ensure!(actual == expected, "expected {expected:?}, got {actual:?}");
    Ok(())
}

#[then("the diff lists {names}")]
fn assert_diff(sync_context: &SyncContext, names: String) -> Result<()> {
    let actual = sync_context
        .diff
        .take()
        .ok_or_else(|| anyhow!("no diff was computed"))?;
    let expected = field_list(&names);
    ensure!(actual == expected, "expected {expected:?}, got {actual:?}");
    Ok(())
}

#[then("propagation fails with a depth error at {path}")]
fn assert_depth_error(sync_context: &SyncContext, path: String) -> Result<()> {
    let err = sync_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("no propagation was attempted"))?
        .err()
        .ok_or_else(|| anyhow!("propagation should have failed"))?;
    let cause = err
        .coerce_error()
        .ok_or_else(|| anyhow!("expected a field error, got {err:?}"))?;
    ensure!(
        matches!(cause.innermost(), CoerceError::DepthExceeded { .. }),
        "unexpected cause {cause:?}"
    );
    let expected = normalize_scalar(&path);
    ensure!(cause.path() == expected, "expected path {expected}, got {}", cause.path());
    ensure!(
        matches!(err, SyncError::Field { field: "child", .. }),
        "unexpected top-level field in {err:?}"
    );
    Ok(())
}

#[then("the mirror holds {len} nodes")]
fn assert_mirror(sync_context: &SyncContext, len: String) -> Result<()> {
    let expected = count(&len)?;
    let outcome = sync_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("no propagation was attempted"))?;
    outcome?;
    let mirror = sync_context
        .mirror
        .take()
        .ok_or_else(|| anyhow!("mirror missing"))?;
    ensure!(
        mirror_len(&mirror) == expected,
        "expected {expected} nodes, got {}",
        mirror_len(&mirror)
    );
    Ok(())
}
