//! Entry point from plain-mapping space into [`IndifferentMap`].
//!
//! Collaborators holding a plain [`Map`], a JSON object, or a [`Value`]
//! adopt indifferent access through this trait instead of reaching for the
//! map's constructors.

use crate::map::IndifferentMap;
use crate::value::{Map, Value};

pub trait WithIndifferentAccess {
    /// Normalized copy of `self` as an [`IndifferentMap`].
    fn with_indifferent_access(&self) -> IndifferentMap;
}

impl WithIndifferentAccess for Map {
    fn with_indifferent_access(&self) -> IndifferentMap {
        IndifferentMap::from(self.clone())
    }
}

impl WithIndifferentAccess for IndifferentMap {
    fn with_indifferent_access(&self) -> IndifferentMap {
        self.clone()
    }
}

impl WithIndifferentAccess for Value {
    fn with_indifferent_access(&self) -> IndifferentMap {
        IndifferentMap::from_value(self.clone())
    }
}

impl WithIndifferentAccess for serde_json::Map<String, serde_json::Value> {
    fn with_indifferent_access(&self) -> IndifferentMap {
        IndifferentMap::from_value(serde_json::Value::Object(self.clone()))
    }
}
