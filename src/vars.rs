// Variables the user has assigned so far ("x = 5"), sent along with every analysis.

use std::collections::HashMap;

pub type VarMap = HashMap<String, String>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VariableDictionary {
    vars: VarMap,
}

impl VariableDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`.
    pub fn record_assignment(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        tracing::debug!(%name, %value, "variable assigned");
        self.vars.insert(name, value);
    }

    /// Owned copy for the next request; later assignments do not affect it.
    pub fn current_snapshot(&self) -> VarMap {
        self.vars.clone()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
