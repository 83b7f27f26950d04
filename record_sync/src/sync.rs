//! Reusable propagation setup.

use std::fmt;

use crate::diff::diff_fields_with;
use crate::error::SyncResult;
use crate::options::SyncOptions;
use crate::policy::{
    DestinationIsDefault, IgnoreFields, SelectionPolicy, SourceIsNotDefault, TargetFields,
    ValuesDiffer,
};
use crate::propagate::propagate_with;
use crate::reflect::Record;

/// Owns a policy list and options, and runs either engine with them.
///
/// Policies must be `Send + Sync`, so one synchronizer can serve several
/// threads.
///
/// ```
/// use record_sync::{Record, Synchronizer};
///
/// #[derive(Clone, Default, Record)]
/// struct Profile {
///     pub name: String,
///     pub bio: String,
/// }
///
/// let fill_gaps = Synchronizer::new().only_default_destinations();
/// let source = Profile { name: "Ada".into(), bio: "Mathematician".into() };
/// let mut target = Profile { name: "Grace".into(), ..Profile::default() };
/// fill_gaps.propagate(&source, &mut target)?;
/// assert_eq!(target.name, "Grace");
/// assert_eq!(target.bio, "Mathematician");
/// # Ok::<(), record_sync::SyncError>(())
/// ```
#[derive(Default)]
pub struct Synchronizer {
    options: SyncOptions,
    policies: Vec<Box<dyn SelectionPolicy + Send + Sync>>,
}

impl fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("options", &self.options)
            .field("policies", &self.policies.len())
            .finish()
    }
}

impl Synchronizer {
    /// Synchronizer with default options and no policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a policy; all policies must accept a field for it to be processed.
    #[must_use]
    pub fn policy<P>(mut self, policy: P) -> Self
    where
        P: SelectionPolicy + Send + Sync + 'static,
    {
        self.policies.push(Box::new(policy));
        self
    }

    /// Skip the named fields.
    #[must_use]
    pub fn ignore<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy(IgnoreFields::new(names))
    }

    /// Process only the named fields.
    #[must_use]
    pub fn target<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy(TargetFields::new(names))
    }

    /// Leave destination fields that already hold a value untouched.
    #[must_use]
    pub fn only_default_destinations(self) -> Self {
        self.policy(DestinationIsDefault)
    }

    /// Skip source fields that hold a default value.
    #[must_use]
    pub fn skip_default_sources(self) -> Self {
        self.policy(SourceIsNotDefault)
    }

    /// Skip fields whose values already match.
    #[must_use]
    pub fn only_changed(self) -> Self {
        self.policy(ValuesDiffer)
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Copy selected fields from `source` onto `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SyncError::Field`] for the first field that cannot
    /// be converted.
    pub fn propagate<S, D>(&self, source: &S, destination: &mut D) -> SyncResult<()>
    where
        S: Record,
        D: Record,
    {
        propagate_with(&self.options, source, destination, &self.borrowed())
    }

    /// External names of the fields [`Synchronizer::propagate`] would touch.
    #[must_use]
    pub fn diff<S, D>(&self, source: &S, destination: &D) -> Vec<String>
    where
        S: Record,
        D: Record,
    {
        diff_fields_with(&self.options, source, destination, &self.borrowed())
    }

    fn borrowed(&self) -> Vec<&dyn SelectionPolicy> {
        self.policies
            .iter()
            .map(|policy| &**policy as &dyn SelectionPolicy)
            .collect()
    }
}
