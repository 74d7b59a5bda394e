use serde::Deserialize;
use serde::Serialize;

/// Well-known action tags produced by the store.
///
/// The watch engine treats actions as opaque strings; these are provided so
/// producers and consumers agree on spelling.
pub mod action {
    pub const GET: &str = "get";
    pub const CREATE: &str = "create";
    pub const SET: &str = "set";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const COMPARE_AND_SWAP: &str = "compareAndSwap";
    pub const COMPARE_AND_DELETE: &str = "compareAndDelete";
    pub const EXPIRE: &str = "expire";
}

/// One committed mutation of the key space.
///
/// `index` is assigned by the store at commit time and is strictly
/// increasing across events. `term` and `value` are carried through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Kind of mutation, see [`action`]
    pub action: String,
    /// Absolute path of the affected node
    pub key: String,
    /// Commit index
    pub index: u64,
    /// Consensus term the mutation was committed in
    #[serde(default)]
    pub term: u64,
    /// New value, if the mutation carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Event {
    pub fn new(
        action: impl Into<String>,
        key: impl Into<String>,
        index: u64,
        term: u64,
    ) -> Self {
        Self {
            action: action.into(),
            key: key.into(),
            index,
            term,
            value: None,
        }
    }

    pub fn with_value(
        mut self,
        value: impl Into<String>,
    ) -> Self {
        self.value = Some(value.into());
        self
    }
}
