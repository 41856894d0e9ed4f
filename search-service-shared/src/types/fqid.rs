//! Fully-qualified document ids.
//!
//! Every row in the shared `models` table is keyed by an fqid of the form
//! `"<collection>/<numeric-id>"`, identifying a document across all
//! collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string cannot be parsed as an fqid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FqidParseError {
    /// The separator between collection and id is missing.
    #[error("missing '/' separator in fqid '{0}'")]
    MissingSeparator(String),

    /// The collection part is empty.
    #[error("empty collection in fqid '{0}'")]
    EmptyCollection(String),

    /// The id part is not a number.
    #[error("non-numeric id in fqid '{0}'")]
    NonNumericId(String),
}

/// A fully-qualified id, `"<collection>/<numeric-id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fqid {
    /// The collection the document belongs to.
    pub collection: String,
    /// The document's numeric id within its collection.
    pub id: i64,
}

impl Fqid {
    /// Create an fqid from its parts.
    pub fn new(collection: impl Into<String>, id: i64) -> Self {
        Self {
            collection: collection.into(),
            id,
        }
    }
}

impl FromStr for Fqid {
    type Err = FqidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (collection, id) = value
            .split_once('/')
            .ok_or_else(|| FqidParseError::MissingSeparator(value.to_string()))?;
        if collection.is_empty() {
            return Err(FqidParseError::EmptyCollection(value.to_string()));
        }
        let id = id
            .parse::<i64>()
            .map_err(|_| FqidParseError::NonNumericId(value.to_string()))?;
        Ok(Self::new(collection, id))
    }
}

impl fmt::Display for Fqid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl TryFrom<String> for Fqid {
    type Error = FqidParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fqid> for String {
    fn from(fqid: Fqid) -> Self {
        fqid.to_string()
    }
}
