//! Record types and sample values shared by the `record_sync` test suites.
//!
//! Pairs of records with the same field names but different declared types
//! exercise the conversion paths; identical pairs exercise plain copies.

use chrono::{DateTime, Utc};
use record_sync::{NullBool, NullFloat, NullInt, NullString, Record};
use serde::Serialize;

/// Account holder used by the diff examples.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct User {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Optional gender, never treated as a default value.
    pub gender: NullString,
}

impl User {
    /// Build a user without a gender.
    #[must_use]
    pub fn new(id: i64, name: &str, age: i64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            age,
            gender: NullString::null(),
        }
    }
}

/// Job grade attached to a [`Profile`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Grade {
    /// Job title.
    pub position: String,
    /// Seniority level.
    pub grade: i32,
}

/// Same shape as [`Grade`] with a wider level and an extra field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Contract {
    /// Job title.
    pub position: String,
    /// Seniority level.
    pub grade: i64,
    /// Yearly salary.
    pub salary: i64,
}

/// Personal profile mixing nullable wrappers, timestamps, and pointers.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub struct Profile {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: NullInt,
    /// Smoking status.
    pub is_smoker: NullBool,
    /// Postal address.
    pub address: String,
    /// Birth date.
    pub date_of_birth: DateTime<Utc>,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: NullFloat,
    /// Current role.
    pub role: Option<Box<Grade>>,
}

/// 2000-01-01T00:00:00Z.
#[must_use]
pub fn millennium() -> DateTime<Utc> {
    DateTime::from_timestamp(946_684_800, 0).unwrap_or_default()
}

/// A profile with every field populated.
#[must_use]
pub fn filled_profile() -> Profile {
    Profile {
        id: 1,
        name: "foo".to_owned(),
        age: NullInt::from_value(10),
        is_smoker: NullBool::from_value(false),
        address: "Chiyoda, Tokyo".to_owned(),
        date_of_birth: millennium(),
        height: 180.01,
        weight: NullFloat::from_value(60.01),
        role: Some(Box::new(Grade {
            position: String::new(),
            grade: 10,
        })),
    }
}

/// A profile holding only an id and a name.
#[must_use]
pub fn sparse_profile() -> Profile {
    Profile {
        id: 2,
        name: "bar".to_owned(),
        ..Profile::default()
    }
}

/// Applicant form with an extra field the member record lacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Applicant {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Age as entered a second time.
    pub age2: i32,
}

/// Member record with fields the applicant form lacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Member {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Contact address.
    pub email: String,
    /// Test score.
    pub iq: i64,
}

/// Staff entry whose roles point at [`Grade`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Staff {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Main role.
    pub primary: Option<Box<Grade>>,
    /// Secondary role.
    pub secondary: Option<Box<Grade>>,
}

/// Staff entry whose main role points at [`Contract`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct StaffRecord {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Main role, with a different pointee type.
    pub primary: Option<Box<Contract>>,
    /// Secondary role.
    pub secondary: Option<Box<Grade>>,
}

/// Priced item owned by a [`Hobby`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Item {
    /// Price in yen.
    pub price: i64,
}

/// Hobby with an optional item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Hobby {
    /// Hobby name.
    pub name: String,
    /// Equipment, if any.
    pub item: Option<Box<Item>>,
}

/// Same shape as [`Item`] with a narrower price.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Listing {
    /// Price in yen.
    pub price: i32,
}

/// Same shape as [`Hobby`] pointing at [`Listing`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Interest {
    /// Hobby name.
    pub name: String,
    /// Equipment, if any.
    pub item: Option<Box<Listing>>,
}

/// Person with one optional hobby and a list of hobbies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Enthusiast {
    /// Age in years.
    pub age: i64,
    /// Main hobby.
    pub hobby: Option<Box<Hobby>>,
    /// Every hobby.
    pub hobbies: Vec<Hobby>,
}

/// Same shape as [`Enthusiast`] with differently typed hobbies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Hobbyist {
    /// Age in years.
    pub age: i64,
    /// Main hobby.
    pub hobby: Option<Box<Interest>>,
    /// Every hobby.
    pub hobbies: Vec<Interest>,
}

/// Singly linked chain used to exercise the nesting limit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Node {
    /// Position in the chain.
    pub label: String,
    /// Next link.
    pub child: Option<Box<Node>>,
}

/// Same shape as [`Node`], so copies between the two recurse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct MirrorNode {
    /// Position in the chain.
    pub label: String,
    /// Next link.
    pub child: Option<Box<MirrorNode>>,
}

/// Chain of `len` nodes labelled `0..len`, outermost first.
///
/// A `len` of zero yields a single unlabelled node.
#[must_use]
pub fn chain(len: usize) -> Node {
    (0..len).rev().fold(Node::default(), |tail, position| Node {
        label: position.to_string(),
        child: (!tail.label.is_empty()).then(|| Box::new(tail)),
    })
}

/// Number of links below `node`, the node itself included.
#[must_use]
pub fn mirror_len(node: &MirrorNode) -> usize {
    let mut count = 1;
    let mut current = node;
    while let Some(next) = current.child.as_deref() {
        count += 1;
        current = next;
    }
    count
}

/// Closed set of payload types a sensor can report.
#[derive(Clone, Debug, PartialEq, Record)]
pub enum Measurement {
    /// A whole-number count.
    Count(i64),
    /// A free-form label.
    Label(String),
    /// A job grade.
    Grade(Grade),
}

impl Default for Measurement {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Record with a dynamic slot.
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub struct Sensor {
    /// Sensor name.
    pub name: String,
    /// Latest reading.
    pub reading: Measurement,
}

/// Record with a concrete reading, compatible with [`Sensor`].
#[derive(Clone, Debug, Default, PartialEq, Record)]
pub struct Probe<T> {
    /// Sensor name.
    pub name: String,
    /// Latest reading.
    pub reading: T,
}

/// Contact card whose serde names differ from the field names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Display name.
    pub user_name: String,
    /// Mail address.
    #[record(alias(db = "contact_email"))]
    pub email_address: String,
    /// Free text, exported under its own name.
    #[serde(rename = "memo")]
    pub note: String,
}
