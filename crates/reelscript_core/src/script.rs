//! The fixed-size script collection produced by one generation.

use reelscript_error::{ContractError, ContractErrorKind};
use serde::{Deserialize, Serialize};

/// Number of scripts every generation must return.
pub const SCRIPT_COUNT: usize = 5;

/// Exactly [`SCRIPT_COUNT`] script texts in display order.
///
/// # Examples
///
/// ```
/// use reelscript_core::ScriptSet;
///
/// let scripts = (1..=5).map(|i| format!("Script {i}")).collect();
/// let set = ScriptSet::new(scripts).unwrap();
/// assert_eq!(set.scripts()[4], "Script 5");
///
/// assert!(ScriptSet::new(vec!["only one".to_string()]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScriptSetWire")]
pub struct ScriptSet {
    scripts: Vec<String>,
}

#[derive(Deserialize)]
struct ScriptSetWire {
    scripts: Vec<String>,
}

impl TryFrom<ScriptSetWire> for ScriptSet {
    type Error = ContractError;

    fn try_from(wire: ScriptSetWire) -> Result<Self, Self::Error> {
        ScriptSet::new(wire.scripts)
    }
}

impl ScriptSet {
    /// Build a set, rejecting any count other than [`SCRIPT_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns [`ContractErrorKind::WrongCount`] for a wrong-sized collection.
    #[track_caller]
    pub fn new(scripts: Vec<String>) -> Result<Self, ContractError> {
        if scripts.len() != SCRIPT_COUNT {
            return Err(ContractError::new(ContractErrorKind::WrongCount {
                expected: SCRIPT_COUNT,
                actual: scripts.len(),
            }));
        }
        Ok(Self { scripts })
    }

    /// Scripts in display order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Consume the set, yielding the scripts.
    pub fn into_scripts(self) -> Vec<String> {
        self.scripts
    }

    /// Iterate the scripts in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.scripts.iter()
    }
}

impl<'a> IntoIterator for &'a ScriptSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.scripts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Script {i}")).collect()
    }

    #[test]
    fn test_only_five_is_accepted() {
        for n in [0, 4, 6] {
            let err = ScriptSet::new(scripts(n)).unwrap_err();
            assert_eq!(
                err.kind,
                ContractErrorKind::WrongCount {
                    expected: 5,
                    actual: n
                }
            );
        }
        assert!(ScriptSet::new(scripts(5)).is_ok());
    }

    #[test]
    fn test_serializes_as_scripts_object() {
        let set = ScriptSet::new(scripts(5)).unwrap();
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["scripts"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn test_deserialize_enforces_count() {
        let three = serde_json::json!({"scripts": ["a", "b", "c"]});
        assert!(serde_json::from_value::<ScriptSet>(three).is_err());
    }
}
