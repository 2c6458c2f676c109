use crate::context::ContextState;

/// A configurable value, together with the bounds of the value and the latest state of a context at which the value may be revised.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    /// The name of the option, as used in logs.
    pub name: &'static str,

    /// The least permitted value.
    pub min: T,

    /// The greatest permitted value.
    pub max: T,

    /// The latest state at which the option may be revised.
    pub max_state: ContextState,

    /// The value of the option.
    pub value: T,
}

impl<T: PartialOrd> ConfigOption<T> {
    /// Sets the value of the option, if within bounds.
    /// Returns true if the value was set, false otherwise.
    pub fn set(&mut self, value: T) -> bool {
        if self.min <= value && value <= self.max {
            self.value = value;
            true
        } else {
            log::warn!("Value for {} out of bounds", self.name);
            false
        }
    }
}
