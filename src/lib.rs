//! # reactlog - reaction middleware for log streams
//!
//! reactlog sits between a logging call site and its output sink. Every
//! record written through it is checked for a registered trigger, and a
//! matching trigger runs a pluggable reaction that decides whether the record
//! still reaches the sink.
//!
//! ## Core Concepts
//!
//! - **Record**: the bytes of one `write` call, usually one log line
//! - **Trigger**: a word (or substring) that selects a reaction
//! - **Reactor**: logic run on a matched record, returning a [`Verdict`]
//! - **MatchDiscipline**: whole-word or substring trigger matching, fixed
//!   per dispatcher
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reactlog::{Discard, ReactLog, Redirect, SharedBuffer};
//!
//! let audit = SharedBuffer::new();
//! let mut log = ReactLog::new(std::io::stderr());
//! log.register("DEBUG", Discard)?;
//! log.register("AUDIT", Redirect::new(audit.clone()))?;
//!
//! log.submit(b"DEBUG this is dropped\n")?;
//! log.submit(b"AUDIT this goes to the audit buffer\n")?;
//! log.submit(b"ERROR this reaches stderr\n")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod reaction;
pub mod record;
pub mod registry;
pub mod sink;
pub mod trigger;

pub use config::{ActionConfig, ReactLogConfig, RuleConfig};
pub use dispatcher::ReactLog;
pub use error::{ReactError, ReactResult, ValidationError};
pub use reaction::{Copy, Discard, Reactor, Redirect, Verdict};
pub use registry::{BoxedReactor, TriggerRegistry};
pub use sink::{SharedBuffer, SharedReactLog};
pub use trigger::{MatchDiscipline, Trigger};
