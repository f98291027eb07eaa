use std::fmt;

use serde::{Deserialize, Serialize};

/// Only used for display; the interpolation never looks at it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StopID(pub String);

impl StopID {
    pub fn new<I: Into<String>>(id: I) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for StopID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
