use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Identity of an interface: its name within a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interface {
    pub name: String,
    pub package: String,
}

/// Where an interface was declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceLocation {
    pub version: String,
    /// Path relative to the archive root, e.g. `src/io/io.go`
    pub source_file: String,
    /// 1-based physical line of the `type ... interface {` line
    pub line_number: usize,
    pub link: String,
}

/// Interfaces keyed by identity. `FxHashMap` iterates deterministically, so
/// two runs over the same archives produce the same map.
pub type InterfaceMap = FxHashMap<Interface, InterfaceLocation>;

/// Move every record of `from` into `into`, overwriting locations of
/// interfaces already present (last write wins).
///
/// Overwrites inside one version happen when a package declares the same
/// interface name in several files, typically behind build constraints. The
/// surviving location is simply whichever file came last in the archive;
/// each overwrite is traced at debug level so it can be audited.
pub fn merge(into: &mut InterfaceMap, from: InterfaceMap) {
    for (interface, location) in from {
        match into.entry(interface) {
            Entry::Occupied(mut existing) => {
                debug!(
                    name = %existing.key().name,
                    package = %existing.key().package,
                    previous = %existing.get().link,
                    replacement = %location.link,
                    "replacing interface location"
                );
                existing.insert(location);
            }
            Entry::Vacant(slot) => {
                slot.insert(location);
            }
        }
    }
}
