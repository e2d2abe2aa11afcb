//! Chat request defaults.

use serde::{Deserialize, Serialize};

const fn default_include_answer_log() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Model name sent with every chat request unless overridden.
    #[serde(default)]
    pub model: String,

    /// Request `answerLog` so retrieval chunks can be checked.
    #[serde(default = "default_include_answer_log")]
    pub include_answer_log: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            include_answer_log: default_include_answer_log(),
        }
    }
}

impl ChatConfig {
    pub fn is_configured(&self) -> bool {
        !self.model.is_empty()
    }
}
