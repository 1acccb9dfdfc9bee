//! Paged `describe-stacks` queries against the deployed stack.
//!
//! CloudFormation pages the describe-stacks response; a stack with many
//! parameters can span several pages, so the fetch loop follows `NextToken`
//! continuation cursors until a page arrives without one.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::exec::CommandRunner;

/// One configuration input currently set on the deployed stack.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StackParameter {
    /// Parameter name
    #[serde(rename = "ParameterKey")]
    pub key: String,

    /// Parameter value, opaque text
    #[serde(rename = "ParameterValue")]
    pub value: String,
}

impl StackParameter {
    /// Render as a `sam deploy` override token.
    ///
    /// The value is quoted so it survives as a single token even when it
    /// contains whitespace or shell-special characters.
    pub fn override_token(&self) -> String {
        format!("{}=\"{}\"", self.key, self.value)
    }
}

/// One stack entry in a describe-stacks response.
#[derive(Debug, Deserialize)]
struct StackDescription {
    // CloudFormation omits the field entirely for a parameterless stack
    #[serde(rename = "Parameters", default)]
    parameters: Vec<StackParameter>,
}

/// One page of a describe-stacks response.
#[derive(Debug, Deserialize)]
struct DescribeStacksPage {
    #[serde(rename = "Stacks", default)]
    stacks: Vec<StackDescription>,

    /// Continuation cursor; absent on the final page.
    #[serde(rename = "NextToken")]
    next_token: Option<String>,
}

/// Collect one override token per parameter currently set on `stack_name`.
///
/// Invokes `aws cloudformation describe-stacks` repeatedly, passing the
/// previous page's continuation cursor via `--starting-token` on every call
/// after the first. Tokens accumulate in response order across all pages.
/// Duplicate keys, should the API ever report them, stay duplicated rather
/// than being collapsed.
pub fn fetch_parameter_overrides(
    runner: &dyn CommandRunner,
    stack_name: &str,
) -> Result<Vec<String>> {
    let mut overrides = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let mut args = vec![
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            stack_name,
        ];
        if let Some(token) = next_token.as_deref() {
            args.push("--starting-token");
            args.push(token);
        }

        let stdout = runner.capture("aws", &args)?;
        let page: DescribeStacksPage = serde_json::from_slice(&stdout)?;
        pages += 1;

        for stack in page.stacks {
            for parameter in stack.parameters {
                overrides.push(parameter.override_token());
            }
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(pages, parameters = overrides.len(), "collected stack parameters");
    Ok(overrides)
}
