//! Timestamps are struct-shaped but copied whole.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::catalog::Kind;

crate::reflect_opaque!(DateTime<Utc>, Kind::Record);
crate::reflect_opaque!(NaiveDateTime, Kind::Record);
crate::reflect_opaque!(NaiveDate, Kind::Record);
