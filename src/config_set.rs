//! Fully-parsed interface configuration
//!
//! A `ConfigurationSet` maps interface names to shared definitions.
//! Queries never modify the set they run on; they return a new set
//! holding the same `Arc<Interface>` values.

mod closure;
mod order;

use crate::error::{Error, Result};
use crate::interface::Interface;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A (possibly partial) set of interface definitions keyed by name
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSet {
    entries: HashMap<String, Arc<Interface>>,
}

impl ConfigurationSet {
    /// Wrap a name -> interface mapping
    ///
    /// Every key must match the name of the interface stored under it.
    pub fn new(entries: HashMap<String, Arc<Interface>>) -> Result<Self> {
        if let Some((key, iface)) = entries.iter().find(|(key, iface)| *key != iface.name()) {
            warn!(key = %key, name = %iface.name(), "rejecting mismatched interface entry");
            return Err(Error::InvalidInput {
                key: key.clone(),
                name: iface.name().to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Build a set from interface definitions, keyed by their own names
    pub fn from_interfaces<I>(interfaces: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Interface>>,
    {
        let mut entries = HashMap::new();
        for iface in interfaces {
            let iface: Arc<Interface> = iface.into();
            let name = iface.name().to_string();
            if entries.contains_key(&name) {
                warn!(name = %name, "rejecting duplicate interface definition");
                return Err(Error::DuplicateInterface(name));
            }
            entries.insert(name, iface);
        }

        Ok(Self { entries })
    }

    /// Get an interface definition by name
    pub fn get(&self, name: &str) -> Option<&Arc<Interface>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interface names in lexicographic order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Section labels present in the set, sorted and de-duplicated
    pub fn sections(&self) -> Vec<&str> {
        self.entries
            .values()
            .map(|iface| iface.section())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Iterate over (name, interface) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Interface>)> {
        self.entries.iter().map(|(name, iface)| (name.as_str(), iface))
    }

    /// Look up a name, returning the stored key alongside the definition
    fn lookup(&self, name: &str) -> Result<(&str, &Arc<Interface>)> {
        self.entries
            .get_key_value(name)
            .map(|(key, iface)| (key.as_str(), iface))
            .ok_or_else(|| Error::MissingInterface(name.to_string()))
    }

    /// New set aliasing the given members of this one
    fn subset<'a, I>(&'a self, members: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Arc<Interface>)>,
    {
        Self {
            entries: members
                .into_iter()
                .map(|(name, iface)| (name.to_string(), Arc::clone(iface)))
                .collect(),
        }
    }

    fn sorted(&self) -> BTreeMap<&str, &Interface> {
        self.entries
            .iter()
            .map(|(name, iface)| (name.as_str(), iface.as_ref()))
            .collect()
    }
}

/// Interface names grouped by section: `bridges: br0; ethernets: eth0, eth1`
impl fmt::Display for ConfigurationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut by_section: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, iface) in &self.entries {
            by_section.entry(iface.section()).or_default().push(name);
        }

        let mut groups: Vec<String> = by_section
            .into_iter()
            .map(|(section, mut names)| {
                names.sort_unstable();
                format!("{}: {}", section, names.join(", "))
            })
            .collect();
        // Sort by rendered text, not section alone
        groups.sort_unstable();

        f.write_str(&groups.join("; "))
    }
}

impl fmt::Debug for ConfigurationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigurationSet").field(&self.sorted()).finish()
    }
}

impl Serialize for ConfigurationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.sorted())
    }
}
