// properties_core/src/property/property_map.rs
use std::fmt;
use std::fs;
use std::path::Path;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::error::Result;
use crate::property::descriptor::PropertyDescriptor;

/// Ordered mapping from property name to its descriptor.
///
/// Iteration follows insertion order. Names are unique: inserting a name
/// that is already present replaces its descriptor without moving it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyDescriptor)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a property. Returns the replaced descriptor, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: PropertyDescriptor,
    ) -> Option<PropertyDescriptor> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, descriptor)),
            None => {
                self.entries.push((name, descriptor));
                None
            }
        }
    }

    /// Chainable form of `insert`.
    pub fn with(mut self, name: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyDescriptor> {
        let i = self.position(name)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a property, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<PropertyDescriptor> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.entries.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the map to a pretty .ron string.
    pub fn to_ron(&self) -> Result<String> {
        Ok(to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Writes the map as a .ron file, creating parent folders as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl<K: Into<String>> FromIterator<(K, PropertyDescriptor)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (K, PropertyDescriptor)>>(iter: T) -> Self {
        let mut map = PropertyMap::new();
        for (name, descriptor) in iter {
            map.insert(name, descriptor);
        }
        map
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, PropertyDescriptor);
    type IntoIter = std::vec::IntoIter<(String, PropertyDescriptor)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, descriptor) in &self.entries {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

struct PropertyMapVisitor;

impl<'de> Visitor<'de> for PropertyMapVisitor {
    type Value = PropertyMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of property names to descriptors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<PropertyMap, A::Error> {
        let mut map = PropertyMap::new();
        while let Some((name, descriptor)) = access.next_entry::<String, PropertyDescriptor>()? {
            map.insert(name, descriptor);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PropertyMapVisitor)
    }
}
