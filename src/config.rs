/// Largest number of INPUT nodes a truth table can have.
///
/// Combinations are enumerated as `u64`.
pub const MAX_INPUTS: u32 = 63;

/// Default limit on the number of INPUT nodes.
pub const DEFAULT_MAX_INPUTS: u32 = 32;

/// Options for truth-table generation.
///
/// # Examples
///
/// ```
/// use netlist_rs::config::TableConfig;
///
/// let config = TableConfig::default().with_max_inputs(16);
/// assert_eq!(config.max_inputs, 16);
/// assert!(config.validate);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TableConfig {
    /// Tables with more INPUT nodes are rejected before the first row.
    pub max_inputs: u32,
    /// Run [`NodeGraph::validate`][crate::graph::NodeGraph::validate] before
    /// the first row.
    pub validate: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_inputs: DEFAULT_MAX_INPUTS,
            validate: true,
        }
    }
}

impl TableConfig {
    /// # Panics
    ///
    /// Panics if `max_inputs` exceeds [`MAX_INPUTS`].
    pub fn with_max_inputs(mut self, max_inputs: u32) -> Self {
        assert!(
            max_inputs <= MAX_INPUTS,
            "max_inputs should be in the range 0..={}",
            MAX_INPUTS
        );
        self.max_inputs = max_inputs;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = TableConfig::default().with_max_inputs(MAX_INPUTS).with_validation(false);
        assert_eq!(config.max_inputs, 63);
        assert!(!config.validate);
    }

    #[test]
    #[should_panic(expected = "max_inputs should be in the range")]
    fn test_max_inputs_too_large() {
        let _ = TableConfig::default().with_max_inputs(64);
    }
}
