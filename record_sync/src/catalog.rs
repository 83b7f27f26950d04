//! Field descriptor catalog.
//!
//! Every record type publishes an ordered table of [`FieldDescriptor`]s,
//! normally generated by `#[derive(Record)]`. The table lists public fields
//! in declaration order. A flattened member is listed itself, followed by the
//! fields it promotes. Promoted names follow the usual embedding rules: a
//! shallower field hides deeper ones of the same name, and a name reached
//! twice at the same depth is ambiguous and hidden altogether. Descriptors
//! are built fresh on each call; nothing here caches.

use crate::reflect::{Record, Reflect};

/// Coarse classification of a value's declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// `f32` and `f64`.
    Float,
    /// `String`.
    String,
    /// Structs with named fields, plus opaque structs such as timestamps.
    Record,
    /// `Option<T>`.
    Optional,
    /// `Vec<T>`.
    Sequence,
    /// Enums acting as a closed set of payload types.
    Dynamic,
    /// Anything the engine only copies between identical types.
    Other,
}

impl Kind {
    /// Returns `true` for the kinds that convert through [`crate::Scalar`].
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::String
        )
    }
}

/// Metadata describing one public field of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: Kind,
    type_name: &'static str,
    owner: &'static str,
    index: Vec<usize>,
    aliases: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// Describe the field declared at position `index` of `owner`.
    #[must_use]
    pub fn new(
        name: &'static str,
        kind: Kind,
        type_name: &'static str,
        owner: &'static str,
        index: usize,
    ) -> Self {
        Self {
            name,
            kind,
            type_name,
            owner,
            index: vec![index],
            aliases: &[],
        }
    }

    /// Attach `(key, alias)` pairs naming the field for external formats.
    #[must_use]
    pub const fn with_aliases(mut self, aliases: &'static [(&'static str, &'static str)]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Internal (Rust) field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind of the field.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared type of the field, as reported by `core::any::type_name`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Record type that declares the field.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Positional path from the enumerated record down to the field.
    ///
    /// Directly declared fields have a path of length one; each level of
    /// flattening prepends the position of the flattened member.
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of flattening levels the field was promoted through.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.index.len().saturating_sub(1)
    }

    /// Alias registered for `key`, if any.
    #[must_use]
    pub fn alias(&self, key: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, alias)| *alias)
    }

    /// Name under `key`, falling back to the internal name.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_sync::{FieldDescriptor, Kind};
    ///
    /// let field = FieldDescriptor::new("user_id", Kind::Int, "i64", "User", 0)
    ///     .with_aliases(&[("json", "userId")]);
    /// assert_eq!(field.external_name("json"), "userId");
    /// assert_eq!(field.external_name("db"), "user_id");
    /// ```
    #[must_use]
    pub fn external_name(&self, key: &str) -> &'static str {
        self.alias(key).unwrap_or(self.name)
    }

    fn nested_under(mut self, outer: usize) -> Self {
        self.index.insert(0, outer);
        self
    }
}

/// Ordered descriptors for the record type `T`.
#[must_use]
pub fn enumerate<T: Record>() -> Vec<FieldDescriptor> {
    T::descriptors()
}

/// Append the descriptors of a flattened member to `fields`.
///
/// `inner` comes from the member's [`Record::declared_descriptors`]; each
/// entry is re-rooted under `outer_index`. Name resolution is left to
/// [`visible`].
pub fn promote(
    fields: &mut Vec<FieldDescriptor>,
    outer_index: usize,
    inner: Vec<FieldDescriptor>,
) {
    fields.extend(inner.into_iter().map(|field| field.nested_under(outer_index)));
}

/// Resolve promoted names, keeping declaration order.
///
/// For each name only the shallowest descriptor survives. When two or more
/// descriptors share a name at that shallowest depth the name is ambiguous
/// and every descriptor carrying it is dropped.
///
/// # Examples
///
/// ```
/// use record_sync::catalog::{promote, visible};
/// use record_sync::{FieldDescriptor, Kind};
///
/// let mut fields = vec![FieldDescriptor::new("left", Kind::Record, "Left", "Doc", 0)];
/// promote(&mut fields, 0, vec![FieldDescriptor::new("tag", Kind::String, "String", "Left", 0)]);
/// fields.push(FieldDescriptor::new("right", Kind::Record, "Right", "Doc", 1));
/// promote(&mut fields, 1, vec![FieldDescriptor::new("tag", Kind::Int, "i32", "Right", 0)]);
///
/// let names: Vec<_> = visible(fields).iter().map(FieldDescriptor::name).collect();
/// assert_eq!(names, ["left", "right"]);
/// ```
#[must_use]
pub fn visible(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let shallowest = |name: &str| {
        fields
            .iter()
            .filter(|field| field.name == name)
            .map(FieldDescriptor::depth)
            .min()
    };
    let keep: Vec<bool> = fields
        .iter()
        .map(|field| {
            shallowest(field.name) == Some(field.depth())
                && fields
                    .iter()
                    .filter(|peer| peer.name == field.name && peer.depth() == field.depth())
                    .count()
                    == 1
        })
        .collect();
    fields
        .into_iter()
        .zip(keep)
        .filter_map(|(field, kept)| kept.then_some(field))
        .collect()
}

/// Descriptor named `name` on `record`.
#[must_use]
pub fn find(record: &dyn Record, name: &str) -> Option<FieldDescriptor> {
    record
        .field_descriptors()
        .into_iter()
        .find(|field| field.name == name)
}

/// Value of the field named `name`, following flattened members.
#[must_use]
pub fn lookup<'a>(record: &'a dyn Record, name: &str) -> Option<&'a dyn Reflect> {
    let field = find(record, name)?;
    resolve(record, field.index())
}

/// Mutable access to the field named `name`, following flattened members.
pub fn lookup_mut<'a>(record: &'a mut dyn Record, name: &str) -> Option<&'a mut dyn Reflect> {
    let field = find(record, name)?;
    resolve_mut(record, field.index())
}

/// Follow a descriptor index path from `record`.
#[must_use]
pub fn resolve<'a>(record: &'a dyn Record, path: &[usize]) -> Option<&'a dyn Reflect> {
    let (last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = current.field_at(index)?.as_record()?;
    }
    current.field_at(*last)
}

/// Follow a descriptor index path from `record`, mutably.
pub fn resolve_mut<'a>(record: &'a mut dyn Record, path: &[usize]) -> Option<&'a mut dyn Reflect> {
    let (last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = current.field_at_mut(index)?.as_record_mut()?;
    }
    current.field_at_mut(*last)
}

#[cfg(test)]
mod tests {
    //! Unit tests for descriptor promotion and path resolution.

    use super::*;
    use crate::Record;
    use rstest::rstest;

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Audit {
        pub created_by: String,
        pub revision: u32,
    }

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Document {
        pub title: String,
        #[record(flatten)]
        pub audit: Audit,
        pub revision: u64,
        hidden: bool,
        #[record(skip)]
        pub scratch: Vec<u8>,
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
        fields.iter().map(FieldDescriptor::name).collect()
    }

    #[rstest]
    fn flattened_fields_are_promoted_in_place() {
        let fields = enumerate::<Document>();
        assert_eq!(names(&fields), vec!["title", "audit", "created_by", "revision"]);
    }

    #[rstest]
    fn outer_declaration_shadows_promoted_name() {
        let fields = enumerate::<Document>();
        let revision = fields.iter().find(|field| field.name() == "revision");
        assert_eq!(revision.map(FieldDescriptor::type_name), Some("u64"));
        assert_eq!(revision.map(FieldDescriptor::index), Some(&[2_usize][..]));
        let audit = fields.iter().find(|field| field.name() == "audit");
        assert_eq!(audit.map(FieldDescriptor::kind), Some(Kind::Record));
        assert_eq!(audit.map(FieldDescriptor::index), Some(&[1_usize][..]));
        let created_by = fields.iter().find(|field| field.name() == "created_by");
        assert_eq!(created_by.map(FieldDescriptor::index), Some(&[1_usize, 0][..]));
        assert_eq!(created_by.map(FieldDescriptor::owner), Some(std::any::type_name::<Audit>()));
    }

    #[rstest]
    fn private_and_skipped_fields_are_absent() {
        let doc = Document {
            hidden: true,
            ..Document::default()
        };
        assert!(doc.hidden);
        assert!(lookup(&doc, "hidden").is_none());
        assert!(lookup(&doc, "scratch").is_none());
    }

    #[rstest]
    fn lookup_mut_reaches_promoted_fields() {
        let mut doc = Document::default();
        if let Some(name) = lookup_mut(&mut doc, "created_by")
            .and_then(|value| value.as_any_mut().downcast_mut::<String>())
        {
            name.push_str("ada");
        }
        assert_eq!(doc.audit.created_by, "ada");
    }

    #[rstest]
    fn visible_prefers_shallower_fields() {
        let fields = vec![
            FieldDescriptor::new("a", Kind::Int, "i64", "Outer", 0)
                .nested_under(1)
                .nested_under(2),
            FieldDescriptor::new("a", Kind::Bool, "bool", "Inner", 1).nested_under(3),
        ];
        let fields = visible(fields);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.first().map(FieldDescriptor::kind), Some(Kind::Bool));
        assert_eq!(fields.first().map(FieldDescriptor::index), Some(&[3_usize, 1][..]));
    }

    #[rstest]
    fn visible_hides_names_ambiguous_at_equal_depth() {
        let fields = vec![
            FieldDescriptor::new("left", Kind::Record, "Left", "Outer", 0),
            FieldDescriptor::new("a", Kind::Int, "i64", "Left", 0).nested_under(0),
            FieldDescriptor::new("right", Kind::Record, "Right", "Outer", 1),
            FieldDescriptor::new("a", Kind::Bool, "bool", "Right", 0).nested_under(1),
        ];
        assert_eq!(names(&visible(fields)), vec!["left", "right"]);
    }

    #[rstest]
    fn ambiguity_does_not_hide_a_shallower_field() {
        let fields = vec![
            FieldDescriptor::new("a", Kind::String, "String", "Outer", 0),
            FieldDescriptor::new("a", Kind::Int, "i64", "Left", 0).nested_under(1),
            FieldDescriptor::new("a", Kind::Bool, "bool", "Right", 0).nested_under(2),
        ];
        let fields = visible(fields);
        assert_eq!(names(&fields), vec!["a"]);
        assert_eq!(fields.first().map(FieldDescriptor::kind), Some(Kind::String));
    }

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Left {
        pub tag: String,
        pub shared: bool,
    }

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Right {
        pub tag: i32,
    }

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Tagged {
        pub title: String,
        #[record(flatten)]
        pub audit: Audit,
        #[record(flatten)]
        pub left: Left,
        #[record(flatten)]
        pub right: Right,
    }

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    struct Wrapper {
        #[record(flatten)]
        pub tagged: Tagged,
        #[record(flatten)]
        pub extra: Right,
    }

    #[rstest]
    fn derived_records_hide_ambiguous_promoted_names() {
        let fields = enumerate::<Tagged>();
        assert_eq!(
            names(&fields),
            vec!["title", "audit", "created_by", "revision", "left", "shared", "right"]
        );
        let doc = Tagged::default();
        assert!(lookup(&doc, "tag").is_none());
    }

    #[rstest]
    fn ambiguity_is_resolved_across_nesting_levels() {
        let fields = enumerate::<Wrapper>();
        assert_eq!(
            names(&fields),
            vec![
                "tagged",
                "title",
                "audit",
                "created_by",
                "revision",
                "left",
                "shared",
                "right",
                "extra",
                "tag",
            ]
        );
        let outer = Wrapper::default();
        let tag = lookup(&outer, "tag").and_then(|value| value.as_any().downcast_ref::<i32>());
        assert_eq!(tag, Some(&0));
    }
}
