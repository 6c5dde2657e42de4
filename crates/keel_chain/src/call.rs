use keel_core::Address;
use serde::{Deserialize, Serialize};

/// One argument of a contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    Uint(u128),
    Addr(Address),
    Text(String),
}

/// A fully validated, unit-converted state-changing call, ready to hand to
/// the signer. Fields are set at construction and never change afterwards,
/// so a descriptor is safe to log and to retry-inspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDescriptor {
    target: Address,
    function: String,
    args: Vec<CallArg>,
    value: Option<u128>,
}

impl CallDescriptor {
    pub fn new(target: Address, function: impl Into<String>, args: Vec<CallArg>) -> Self {
        Self {
            target,
            function: function.into(),
            args,
            value: None,
        }
    }

    /// Attach native value to the call (a contribution amount, for example).
    pub fn with_value(mut self, value: u128) -> Self {
        self.value = Some(value);
        self
    }

    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    pub fn value(&self) -> Option<u128> {
        self.value
    }
}

/// A read-only contract query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadQuery {
    target: Address,
    function: String,
    args: Vec<CallArg>,
}

impl ReadQuery {
    pub fn new(target: Address, function: impl Into<String>, args: Vec<CallArg>) -> Self {
        Self {
            target,
            function: function.into(),
            args,
        }
    }

    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[CallArg] {
        &self.args
    }
}
