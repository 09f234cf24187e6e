//! Transitive closure queries over parent relationships
//!
//! Breadth-first expansion with a visited set: every round moves the
//! frontier into `visited` and only names not yet visited can enter the
//! next frontier, so cyclic configurations still terminate.

use super::ConfigurationSet;
use crate::error::Result;
use crate::interface::Interface;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type Members<'a> = HashMap<&'a str, &'a Arc<Interface>>;

impl ConfigurationSet {
    /// Get the given interfaces and all their parents, recursively
    ///
    /// Fails with `Error::MissingInterface` if a requested or referenced
    /// name is not defined; no partial result is returned.
    pub fn get_all_interfaces<I, S>(&self, names: I) -> Result<ConfigurationSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = self.closure(names, |iface| {
            iface.parent_names().iter().map(String::as_str)
        })?;
        debug!(count = members.len(), "resolved interface dependencies");

        Ok(self.subset(members))
    }

    /// Like `get_all_interfaces`, but keep only physical interfaces
    ///
    /// For a VLAN over a bridge over two Ethernet NICs this yields the two
    /// NICs; for an Ethernet interface it yields the interface itself.
    pub fn get_physical_interfaces<I, S>(&self, names: I) -> Result<ConfigurationSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let related = self.get_all_interfaces(names)?;
        Ok(related.subset(related.iter().filter(|(_, iface)| iface.is_physical())))
    }

    /// Get the given interfaces and everything built on top of them
    ///
    /// The reverse of `get_all_interfaces`: taking eth0 down also takes
    /// down a bridge over it and any VLAN over that bridge.
    pub fn get_dependent_interfaces<I, S>(&self, names: I) -> Result<ConfigurationSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for (name, iface) in self.iter() {
            for parent in iface.parent_names() {
                children.entry(parent.as_str()).or_default().push(name);
            }
        }

        let members = self.closure(names, |iface| {
            children
                .get(iface.name())
                .into_iter()
                .flatten()
                .copied()
        })?;
        debug!(count = members.len(), "resolved interface dependents");

        Ok(self.subset(members))
    }

    /// Expand `names` along `neighbours` until no new interface shows up
    fn closure<'a, I, S, F, N>(&'a self, names: I, mut neighbours: F) -> Result<Members<'a>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&'a Arc<Interface>) -> N,
        N: IntoIterator<Item = &'a str>,
    {
        let mut frontier = Members::new();
        for name in names {
            let (key, iface) = self.lookup(name.as_ref())?;
            frontier.insert(key, iface);
        }

        let mut visited = Members::new();
        let mut round = 0usize;
        while !frontier.is_empty() {
            round += 1;
            debug!(round, frontier = frontier.len(), visited = visited.len(), "expanding closure");

            visited.extend(frontier.iter().map(|(name, iface)| (*name, *iface)));

            let mut next = Members::new();
            for &iface in frontier.values() {
                for name in neighbours(iface) {
                    if visited.contains_key(name) || next.contains_key(name) {
                        continue;
                    }
                    let (key, found) = self.lookup(name)?;
                    next.insert(key, found);
                }
            }
            frontier = next;
        }

        Ok(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_set::tests::sample_config;
    use crate::error::Error;

    fn names(config: &ConfigurationSet) -> Vec<&str> {
        config.names()
    }

    #[test]
    fn test_all_interfaces_follows_parents() {
        let config = sample_config();
        let related = config.get_all_interfaces(["vlan0"]).unwrap();
        assert_eq!(names(&related), vec!["br0", "eth0", "eth1", "vlan0"]);
    }

    #[test]
    fn test_physical_interfaces_of_vlan() {
        let config = sample_config();
        let phys = config.get_physical_interfaces(["vlan0"]).unwrap();
        assert_eq!(names(&phys), vec!["eth0", "eth1"]);
        assert_eq!(phys.to_string(), "ethernets: eth0, eth1");
    }

    #[test]
    fn test_physical_interface_returns_itself() {
        let config = sample_config();
        let phys = config.get_physical_interfaces(["eth1"]).unwrap();
        assert_eq!(names(&phys), vec!["eth1"]);
    }

    #[test]
    fn test_full_closure_renders_everything() {
        let config = sample_config();
        let all = config.get_all_interfaces(config.names()).unwrap();
        assert_eq!(all, config);
        assert_eq!(
            all.to_string(),
            "bridges: br0; ethernets: eth0, eth1; vlans: vlan0"
        );
    }

    #[test]
    fn test_closure_is_idempotent() {
        let config = sample_config();
        for start in [vec!["vlan0"], vec!["br0"], vec!["eth0", "eth1"], vec![]] {
            let once = config.get_all_interfaces(&start).unwrap();
            let twice = config.get_all_interfaces(once.names()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_physical_subset_of_all() {
        let config = sample_config();
        for start in ["vlan0", "br0", "eth0"] {
            let all = config.get_all_interfaces([start]).unwrap();
            let phys = config.get_physical_interfaces([start]).unwrap();
            for (name, iface) in phys.iter() {
                assert!(all.contains(name));
                assert!(iface.parent_names().is_empty());
            }
        }
    }

    #[test]
    fn test_self_inclusion() {
        let config = sample_config();
        for name in config.names() {
            assert!(config.get_all_interfaces([name]).unwrap().contains(name));
        }
    }

    #[test]
    fn test_duplicate_request_names() {
        let config = sample_config();
        let related = config.get_all_interfaces(["br0", "br0", "eth0"]).unwrap();
        assert_eq!(names(&related), vec!["br0", "eth0", "eth1"]);
    }

    #[test]
    fn test_empty_request() {
        let config = sample_config();
        let none: [&str; 0] = [];
        assert!(config.get_all_interfaces(none).unwrap().is_empty());
        assert!(config.get_physical_interfaces(none).unwrap().is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        let config = ConfigurationSet::from_interfaces([
            Interface::virtual_interface("a", "bridges", ["b"]),
            Interface::virtual_interface("b", "bridges", ["a"]),
        ])
        .unwrap();

        let related = config.get_all_interfaces(["a"]).unwrap();
        assert_eq!(names(&related), vec!["a", "b"]);
        assert!(config.get_physical_interfaces(["a"]).unwrap().is_empty());
    }

    #[test]
    fn test_self_reference_terminates() {
        let config = ConfigurationSet::from_interfaces([
            Interface::virtual_interface("br0", "bridges", ["br0", "eth0"]),
            Interface::physical("eth0", "ethernets"),
        ])
        .unwrap();

        let related = config.get_all_interfaces(["br0"]).unwrap();
        assert_eq!(names(&related), vec!["br0", "eth0"]);
    }

    #[test]
    fn test_missing_parent() {
        let config = ConfigurationSet::from_interfaces([Interface::virtual_interface(
            "a",
            "vlans",
            ["ghost"],
        )])
        .unwrap();

        assert_eq!(
            config.get_all_interfaces(["a"]).unwrap_err(),
            Error::MissingInterface("ghost".into())
        );
        assert_eq!(
            config.get_physical_interfaces(["a"]).unwrap_err(),
            Error::MissingInterface("ghost".into())
        );
    }

    #[test]
    fn test_missing_requested_name() {
        let config = sample_config();
        assert_eq!(
            config.get_all_interfaces(["eth0", "bond0"]).unwrap_err(),
            Error::MissingInterface("bond0".into())
        );
    }

    #[test]
    fn test_closure_aliases_definitions() {
        let config = sample_config();
        let related = config.get_all_interfaces(["vlan0"]).unwrap();
        for (name, iface) in related.iter() {
            assert!(Arc::ptr_eq(iface, config.get(name).unwrap()));
        }
        // Source set is untouched
        assert_eq!(config.len(), 4);
    }

    #[test]
    fn test_dependents_of_nic() {
        let config = sample_config();
        let dependents = config.get_dependent_interfaces(["eth0"]).unwrap();
        assert_eq!(names(&dependents), vec!["br0", "eth0", "vlan0"]);

        let top = config.get_dependent_interfaces(["vlan0"]).unwrap();
        assert_eq!(names(&top), vec!["vlan0"]);
    }

    #[test]
    fn test_dependents_missing_name() {
        let config = sample_config();
        assert_eq!(
            config.get_dependent_interfaces(["eth9"]).unwrap_err(),
            Error::MissingInterface("eth9".into())
        );
    }

    #[test]
    fn test_dependents_cycle_terminates() {
        let config = ConfigurationSet::from_interfaces([
            Interface::virtual_interface("a", "bonds", ["b"]),
            Interface::virtual_interface("b", "bonds", ["a"]),
            Interface::virtual_interface("c", "vlans", ["a"]),
        ])
        .unwrap();

        let dependents = config.get_dependent_interfaces(["b"]).unwrap();
        assert_eq!(names(&dependents), vec!["a", "b", "c"]);
    }
}
