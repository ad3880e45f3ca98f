use serde::{Deserialize, Serialize};

/// Internal wire format marking an overflow message: the real payload does
/// not fit on the queue and instead lives in a blob, referenced here by
/// container and blob name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageWrapper {
    pub(crate) container_name: String,
    pub(crate) blob_name: String,
}

impl MessageWrapper {
    pub(crate) fn new(container_name: impl Into<String>, blob_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            blob_name: blob_name.into(),
        }
    }

    pub(crate) fn container_name(&self) -> &str {
        &self.container_name
    }

    pub(crate) fn blob_name(&self) -> &str {
        &self.blob_name
    }
}
