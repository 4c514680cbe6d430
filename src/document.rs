use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    culture::CultureTag,
    filetime::BuildStamp,
    resx::{ResourceEntry, value::ResourceValue},
};

pub const LCID_KEY: &str = "lcid";
pub const LANG_KEY: &str = "lang";
pub const BUILD_MARKER_KEY: &str = "r2jng";

/// The JSON object generated for one resource file: its entries followed by the culture
/// metadata and the build marker.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    values: IndexMap<String, ResourceValue>,
}

impl OutputDocument {
    /// A resource key equal to one of the reserved keys keeps its position in the
    /// document, but its value is replaced.
    pub fn assemble<I>(entries: I, culture: Option<&CultureTag>, stamp: BuildStamp) -> Self
    where
        I: IntoIterator<Item = ResourceEntry>,
    {
        let mut values: IndexMap<String, ResourceValue> = entries
            .into_iter()
            .map(ResourceEntry::into_parts)
            .collect();

        values.insert(
            LCID_KEY.to_string(),
            culture.map_or(0, CultureTag::lcid).into(),
        );
        values.insert(
            LANG_KEY.to_string(),
            culture.map_or("", CultureTag::name).into(),
        );
        values.insert(BUILD_MARKER_KEY.to_string(), stamp.filetime().into());

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for OutputDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;

        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}
