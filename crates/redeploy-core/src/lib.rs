//! Redeploy Core Library
//!
//! Parameter-preserving redeployment of a SAM-managed CloudFormation stack.
//!
//! The pipeline is three external invocations glued together: a paged
//! `aws cloudformation describe-stacks` query, `sam package`, and
//! `sam deploy`. Every parameter currently set on the stack is re-supplied
//! to the deploy step as an explicit override so the redeploy never resets
//! it to its template default.

pub mod cloudformation;
pub mod env;
pub mod error;
pub mod exec;
pub mod fakes;
pub mod sam;
pub mod telemetry;
pub mod update;

pub use cloudformation::{fetch_parameter_overrides, StackParameter};
pub use env::{scrub_pager, scrubbed_env, AWS_PAGER};
pub use error::{Result, UpdateError};
pub use exec::{CommandRunner, SystemRunner};
pub use sam::{PACKAGED_TEMPLATE_FILE, TEMPLATE_FILE};
pub use telemetry::init_tracing;
pub use update::{run_update, StackUpdate};

/// Redeploy version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
