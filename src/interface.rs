//! Interface definitions as handed over by a netplan parser
//!
//! Every definition is either a physical NIC (ethernets, wifis) or a
//! virtual interface built on top of other interfaces (bridges, bonds,
//! vlans, tunnels). Only that split matters for dependency queries.

use serde::{Deserialize, Serialize};

/// Physical or virtual interface kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterfaceKind {
    /// Real hardware, nothing upstream
    Physical,
    /// Composite interface defined over its parents
    Virtual {
        /// Parent interface names, in configuration order
        #[serde(default)]
        parents: Vec<String>,
    },
}

/// A single named interface definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Interface {
    /// Interface name (e.g., "eth0", "br0")
    pub name: String,

    /// Section the interface was declared in (e.g., "ethernets")
    pub section: String,

    #[serde(flatten)]
    pub kind: InterfaceKind,
}

impl Interface {
    pub fn new(name: impl Into<String>, section: impl Into<String>, kind: InterfaceKind) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            kind,
        }
    }

    /// Create a physical interface definition
    pub fn physical(name: impl Into<String>, section: impl Into<String>) -> Self {
        Self::new(name, section, InterfaceKind::Physical)
    }

    /// Create a virtual interface definition on top of `parents`
    pub fn virtual_interface<I, S>(
        name: impl Into<String>,
        section: impl Into<String>,
        parents: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            section,
            InterfaceKind::Virtual {
                parents: parents.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Names of the interfaces this one is built on (empty for physical)
    pub fn parent_names(&self) -> &[String] {
        match &self.kind {
            InterfaceKind::Physical => &[],
            InterfaceKind::Virtual { parents } => parents,
        }
    }

    pub fn is_physical(&self) -> bool {
        matches!(self.kind, InterfaceKind::Physical)
    }
}
