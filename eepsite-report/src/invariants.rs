use chrono::{Datelike, NaiveDateTime};
use derive_more::{AsRef, Debug, Display};

/// Identifying token of a visiting peer as recorded in the log line. Opaque;
/// eepsite logs carry router hashes rather than IP addresses, so no address
/// validation applies.
#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash)]
pub struct Router(String);

impl Router {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Router {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

/// Exact request-line string used as a page-ranking key.
#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash)]
pub struct Page(String);

impl Page {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Page {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

/// Calendar year-month bucket, rendered as `YYYY-MM`. Orders by year then
/// month, so sorted iteration is chronological.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{year:04}-{month:02}")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl From<NaiveDateTime> for MonthKey {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}
