//! Field selection policies.
//!
//! A policy is a predicate over `(source, destination, field)`. The engines
//! take a slice of policies and treat a field as selected only when every
//! policy accepts it; there is no built-in disjunction, so callers needing
//! `OR` write a closure.

use crate::catalog::{self, FieldDescriptor};
use crate::detect;
use crate::reflect::{Record, Reflect, deep_equal};

/// Predicate deciding whether a field takes part in propagation or diffing.
///
/// Closures with the matching signature are policies too:
///
/// ```
/// use record_sync::{FieldDescriptor, Record, SelectionPolicy};
///
/// let short_names = |_: &dyn Record, _: &dyn Record, field: &FieldDescriptor| {
///     field.name().len() < 4
/// };
/// # let _: &dyn SelectionPolicy = &short_names;
/// ```
pub trait SelectionPolicy {
    /// Returns `true` when `field` should be processed.
    fn accepts(
        &self,
        source: &dyn Record,
        destination: &dyn Record,
        field: &FieldDescriptor,
    ) -> bool;
}

impl<F> SelectionPolicy for F
where
    F: Fn(&dyn Record, &dyn Record, &FieldDescriptor) -> bool,
{
    fn accepts(
        &self,
        source: &dyn Record,
        destination: &dyn Record,
        field: &FieldDescriptor,
    ) -> bool {
        self(source, destination, field)
    }
}

/// Returns `true` when every policy in `policies` accepts `field`.
///
/// An empty slice accepts everything. Evaluation stops at the first
/// rejection.
#[must_use]
pub fn accepts_all(
    policies: &[&dyn SelectionPolicy],
    source: &dyn Record,
    destination: &dyn Record,
    field: &FieldDescriptor,
) -> bool {
    policies
        .iter()
        .all(|policy| policy.accepts(source, destination, field))
}

fn owned_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Rejects fields whose internal name is listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreFields {
    names: Vec<String>,
}

impl IgnoreFields {
    /// Ignore the fields named in `names`.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: owned_names(names),
        }
    }
}

impl SelectionPolicy for IgnoreFields {
    fn accepts(&self, _: &dyn Record, _: &dyn Record, field: &FieldDescriptor) -> bool {
        !self.names.iter().any(|name| name == field.name())
    }
}

/// Accepts only fields whose internal name is listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetFields {
    names: Vec<String>,
}

impl TargetFields {
    /// Restrict processing to the fields named in `names`.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: owned_names(names),
        }
    }
}

impl SelectionPolicy for TargetFields {
    fn accepts(&self, _: &dyn Record, _: &dyn Record, field: &FieldDescriptor) -> bool {
        self.names.iter().any(|name| name == field.name())
    }
}

/// Accepts a field when the source value deep-equals a literal.
///
/// The comparison is typed: `MatchValue::new(1_i64)` never matches an `i32`
/// field holding `1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchValue<V> {
    value: V,
}

impl<V: Reflect> MatchValue<V> {
    /// Match source fields equal to `value`.
    #[must_use]
    pub const fn new(value: V) -> Self {
        Self { value }
    }
}

impl<V: Reflect> SelectionPolicy for MatchValue<V> {
    fn accepts(&self, source: &dyn Record, _: &dyn Record, field: &FieldDescriptor) -> bool {
        catalog::lookup(source, field.name()).is_some_and(|current| deep_equal(current, &self.value))
    }
}

/// Accepts a field only while the destination still holds its default value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestinationIsDefault;

impl SelectionPolicy for DestinationIsDefault {
    fn accepts(&self, _: &dyn Record, destination: &dyn Record, field: &FieldDescriptor) -> bool {
        detect::is_default(destination, field)
    }
}

/// Rejects fields whose source value is itself a default value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceIsNotDefault;

impl SelectionPolicy for SourceIsNotDefault {
    fn accepts(&self, source: &dyn Record, _: &dyn Record, field: &FieldDescriptor) -> bool {
        !detect::is_default(source, field)
    }
}

/// Accepts a field when its source and destination values differ.
///
/// Values of different concrete types always differ. A field missing from the
/// destination counts as different.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValuesDiffer;

impl SelectionPolicy for ValuesDiffer {
    fn accepts(&self, source: &dyn Record, destination: &dyn Record, field: &FieldDescriptor) -> bool {
        let Some(current) = catalog::lookup(source, field.name()) else {
            return false;
        };
        catalog::lookup(destination, field.name()).is_none_or(|other| !deep_equal(current, other))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the built-in policies.

    use super::*;
    use crate::Record;
    use rstest::{fixture, rstest};

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Person {
        pub id: i64,
        pub name: String,
        pub age: i32,
    }

    #[fixture]
    fn pair() -> (Person, Person) {
        (
            Person {
                id: 1,
                name: "foo".into(),
                age: 30,
            },
            Person {
                id: 0,
                name: "bar".into(),
                age: 30,
            },
        )
    }

    fn selected(policies: &[&dyn SelectionPolicy], pair: &(Person, Person)) -> Vec<&'static str> {
        Person::descriptors()
            .iter()
            .filter(|field| accepts_all(policies, &pair.0, &pair.1, field))
            .map(FieldDescriptor::name)
            .collect()
    }

    #[rstest]
    fn empty_policy_list_accepts_everything(pair: (Person, Person)) {
        assert_eq!(selected(&[], &pair), vec!["id", "name", "age"]);
    }

    #[rstest]
    fn ignore_and_target_are_complements(pair: (Person, Person)) {
        let ignore = IgnoreFields::new(["id"]);
        let target = TargetFields::new(["id"]);
        assert_eq!(selected(&[&ignore], &pair), vec!["name", "age"]);
        assert_eq!(selected(&[&target], &pair), vec!["id"]);
        assert!(selected(&[&ignore, &target], &pair).is_empty());
    }

    #[rstest]
    fn match_value_compares_source_only(pair: (Person, Person)) {
        let same_type = MatchValue::new(30_i32);
        let other_type = MatchValue::new(30_i64);
        let text = MatchValue::new(String::from("foo"));
        assert_eq!(selected(&[&same_type], &pair), vec!["age"]);
        assert!(selected(&[&other_type], &pair).is_empty());
        assert_eq!(selected(&[&text], &pair), vec!["name"]);
    }

    #[rstest]
    fn policies_compose_by_conjunction(pair: (Person, Person)) {
        let ignore = IgnoreFields::new(["age"]);
        let matcher = MatchValue::new(30_i32);
        assert!(selected(&[&ignore, &matcher], &pair).is_empty());
        assert_eq!(selected(&[&matcher], &pair), vec!["age"]);
        assert_eq!(selected(&[&ignore], &pair), vec!["id", "name"]);
    }

    #[rstest]
    fn default_policies_look_at_opposite_sides(pair: (Person, Person)) {
        assert_eq!(selected(&[&DestinationIsDefault], &pair), vec!["id"]);
        assert_eq!(
            selected(&[&SourceIsNotDefault], &pair),
            vec!["id", "name", "age"]
        );
        let (source, destination) = pair;
        let swapped = (destination, source);
        assert_eq!(
            selected(&[&SourceIsNotDefault], &swapped),
            vec!["name", "age"]
        );
    }

    #[rstest]
    fn values_differ_skips_equal_fields(pair: (Person, Person)) {
        assert_eq!(selected(&[&ValuesDiffer], &pair), vec!["id", "name"]);
    }

    #[rstest]
    fn closures_are_policies(pair: (Person, Person)) {
        let adult = |source: &dyn Record, _: &dyn Record, field: &FieldDescriptor| {
            catalog::lookup(source, field.name())
                .and_then(|value| value.as_any().downcast_ref::<i32>())
                .is_some_and(|age| *age >= 18)
        };
        assert_eq!(selected(&[&adult], &pair), vec!["age"]);
    }
}
