//! Embedded sample machine definitions, loadable by name or index.
//!
//! The definitions live as JSON files under `machines/` and are compiled
//! into the binary, so front ends can offer working machines without any
//! filesystem access.

use crate::loader::DefinitionLoader;
use crate::machine::MachineDefinition;
use crate::types::MachineError;
use std::sync::RwLock;

// Default embedded machine definitions
const MACHINE_TEXTS: [(&str, &str); 3] = [
    ("anbn", include_str!("../machines/anbn.json")),
    ("even-as", include_str!("../machines/even-as.json")),
    ("unary-increment", include_str!("../machines/unary-increment.json")),
];

lazy_static::lazy_static! {
    pub static ref CATALOG: RwLock<Vec<(String, MachineDefinition)>> = RwLock::new(Vec::new());
}

pub struct Catalog;

impl Catalog {
    /// Parses the embedded definitions into the shared registry.
    pub fn load() -> Result<(), MachineError> {
        let mut machines = Vec::with_capacity(MACHINE_TEXTS.len());

        for (name, text) in MACHINE_TEXTS {
            match DefinitionLoader::load_str(text) {
                Ok(machine) => machines.push((name.to_string(), machine)),
                Err(e) => eprintln!("Failed to load embedded machine '{}': {}", name, e),
            }
        }

        if let Ok(mut write_guard) = CATALOG.write() {
            *write_guard = machines;
        } else {
            return Err(MachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the names of the available sample machines.
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        CATALOG
            .read()
            .map(|machines| machines.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the number of available sample machines.
    pub fn count() -> usize {
        let _ = Self::load();

        CATALOG.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Fetches a sample machine by name.
    pub fn get(name: &str) -> Result<MachineDefinition, MachineError> {
        let _ = Self::load();

        CATALOG
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(machine_name, _)| machine_name == name)
            .map(|(_, machine)| machine.clone())
            .ok_or_else(|| {
                MachineError::ValidationError(format!("No sample machine named '{}'", name))
            })
    }

    /// Fetches a sample machine by index.
    pub fn get_by_index(index: usize) -> Result<MachineDefinition, MachineError> {
        let _ = Self::load();

        CATALOG
            .read()
            .map_err(|_| MachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|(_, machine)| machine.clone())
            .ok_or_else(|| {
                MachineError::ValidationError(format!("Machine index {} out of range", index))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::Simulator;
    use crate::types::Verdict;

    #[test]
    fn test_all_embedded_machines_parse() {
        Catalog::load().unwrap();
        assert_eq!(Catalog::count(), MACHINE_TEXTS.len());
        assert_eq!(
            Catalog::names(),
            vec!["anbn", "even-as", "unary-increment"]
        );
    }

    #[test]
    fn test_get_by_name_and_index_agree() {
        let by_name = Catalog::get("anbn").unwrap();
        let by_index = Catalog::get_by_index(0).unwrap();
        assert_eq!(by_name.initial_state(), by_index.initial_state());

        assert!(Catalog::get("missing").is_err());
        assert!(Catalog::get_by_index(99).is_err());
    }

    #[test]
    fn test_anbn_sample_recognizes_balanced_strings() {
        let machine = Catalog::get("anbn").unwrap();
        let simulator = Simulator::new(&machine);

        assert!(simulator.simulate("aabb").accepted());
        assert!(simulator.simulate("aaabbb").accepted());
        assert!(!simulator.simulate("aab").accepted());
        assert!(!simulator.simulate("ba").accepted());
    }

    #[test]
    fn test_even_as_sample() {
        let machine = Catalog::get("even-as").unwrap();
        let simulator = Simulator::new(&machine);

        assert!(simulator.simulate("").accepted());
        assert!(simulator.simulate("aa").accepted());
        assert!(!simulator.simulate("a").accepted());
    }

    #[test]
    fn test_unary_increment_sample_grows_the_tape() {
        let machine = Catalog::get("unary-increment").unwrap();
        let outcome = Simulator::new(&machine).simulate("11");

        assert!(matches!(outcome.verdict, Verdict::Accepted { .. }));
        assert_eq!(outcome.trace.last().unwrap().tape, "111");
    }
}
