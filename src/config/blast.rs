//! Configuration of the bit-blaster.

use crate::context::ContextState;

use super::ConfigOption;

/// Configuration for the [bit-blaster](crate::blast).
#[derive(Clone, Debug)]
pub struct BlastConfig {
    /// Share structurally identical gates (same kind, same inputs) across terms.
    pub gate_sharing: ConfigOption<bool>,

    /// The greatest index width of an array access.
    /// An array with index width *i* has 2^*i* elements, each encoded explicitly.
    pub array_index_limit: ConfigOption<u32>,
}

impl Default for BlastConfig {
    fn default() -> Self {
        BlastConfig {
            gate_sharing: ConfigOption {
                name: "gate_sharing",
                min: false,
                max: true,
                max_state: ContextState::Configuration,
                value: true,
            },

            array_index_limit: ConfigOption {
                name: "array_index_limit",
                min: 0,
                max: 16,
                max_state: ContextState::Configuration,
                value: 12,
            },
        }
    }
}
