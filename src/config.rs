//! Declarative rule configuration.
//!
//! A [`ReactLogConfig`] lists trigger rules and the matching discipline, and
//! builds a ready [`ReactLog`] around a primary sink:
//!
//! ```json
//! {
//!   "discipline": "substring",
//!   "rules": [
//!     { "trigger": "DEBUG", "action": { "type": "discard" } },
//!     { "trigger": "user ID 107", "action": { "type": "redirect", "path": "u107.log" } },
//!     { "trigger": "AUDIT", "action": { "type": "copy", "path": "audit.log" } }
//!   ]
//! }
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatcher::ReactLog;
use crate::error::{ReactError, ReactResult};
use crate::reaction::{Copy, Discard, Redirect};
use crate::registry::BoxedReactor;
use crate::trigger::{MatchDiscipline, Trigger};

/// What a rule does when its trigger matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Drop the record.
    Discard,
    /// Append the record to `path` instead of the primary sink.
    Redirect {
        /// Target file.
        path: PathBuf,
    },
    /// Append the record to `path` and still forward it.
    Copy {
        /// Target file.
        path: PathBuf,
    },
}

/// One trigger and its action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Text that selects this rule.
    pub trigger: Trigger,
    /// Reaction run on matching records.
    pub action: ActionConfig,
}

impl RuleConfig {
    /// Pairs a trigger with its action.
    #[must_use]
    pub fn new(trigger: Trigger, action: ActionConfig) -> Self {
        Self { trigger, action }
    }
}

/// Full interceptor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactLogConfig {
    /// Matching discipline; `word` when omitted.
    #[serde(default)]
    pub discipline: MatchDiscipline,
    /// Rules in registration order. A later rule replaces an earlier one
    /// with the same trigger.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl ReactLogConfig {
    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> ReactResult<Self> {
        serde_json::from_str(json).map_err(|e| ReactError::config(format!("invalid config: {e}")))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ReactResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ReactError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json_string(&self) -> ReactResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReactError::config(format!("cannot serialize config: {e}")))
    }

    /// Builds a dispatcher over `out` with every rule registered.
    ///
    /// Redirect and copy targets are opened in create+append mode. Nothing
    /// is returned if any target cannot be opened.
    pub fn build<W: Write>(&self, out: W) -> ReactResult<ReactLog<W>> {
        let mut log = ReactLog::with_discipline(out, self.discipline);
        for rule in &self.rules {
            log.register_boxed(rule.trigger.clone(), rule.action.to_reactor()?);
            if self.discipline == MatchDiscipline::Word && rule.trigger.is_multi_word() {
                debug!(trigger = %rule.trigger, "multi-word trigger can never match whole words");
            }
        }
        debug!(
            discipline = %self.discipline,
            rules = self.rules.len(),
            triggers = log.registry().len(),
            "applied reactlog config"
        );
        Ok(log)
    }
}

impl ActionConfig {
    fn to_reactor(&self) -> ReactResult<BoxedReactor> {
        Ok(match self {
            Self::Discard => Box::new(Discard),
            Self::Redirect { path } => Box::new(Redirect::new(open_append(path)?)),
            Self::Copy { path } => Box::new(Copy::new(open_append(path)?)),
        })
    }
}

fn open_append(path: &Path) -> ReactResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReactError::config(format!("cannot open {}: {e}", path.display())))
}
