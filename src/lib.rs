//! netplan-deps - interface dependency queries for netplan configurations
//!
//! Takes interface definitions produced by a netplan parser and answers
//! which interfaces a given set depends on: a VLAN over a bridge over two
//! NICs needs all four, and only the two NICs are physical.
//!
//! ```
//! use netplan_deps::{ConfigurationSet, Interface};
//!
//! let config = ConfigurationSet::from_interfaces([
//!     Interface::physical("eth0", "ethernets"),
//!     Interface::physical("eth1", "ethernets"),
//!     Interface::virtual_interface("br0", "bridges", ["eth0", "eth1"]),
//!     Interface::virtual_interface("vlan0", "vlans", ["br0"]),
//! ])?;
//!
//! let phys = config.get_physical_interfaces(["vlan0"])?;
//! assert_eq!(phys.to_string(), "ethernets: eth0, eth1");
//! # Ok::<(), netplan_deps::Error>(())
//! ```

pub mod config_set;
pub mod error;
pub mod interface;

pub use config_set::ConfigurationSet;
pub use error::{Error, Result};
pub use interface::{Interface, InterfaceKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
