//! File-backed snapshot of visited identifiers.
//!
//! Another component owns writes to the store. Matching takes a snapshot at
//! the start of each request and only ever asks for membership.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::DatasetError;
use crate::traits::VisitedSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitedIds {
    ids: HashSet<String>,
}

impl VisitedIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a JSON array of identifiers. A missing file is an empty set.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no visited store yet");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let ids: Vec<String> = serde_json::from_str(&json)?;
        Ok(Self::new(ids))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl VisitedSet for VisitedIds {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}
