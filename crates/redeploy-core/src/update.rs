//! The fetch → package → deploy pipeline.

use tracing::debug;

use crate::cloudformation::fetch_parameter_overrides;
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::sam;

/// Inputs for one stack update.
///
/// Both fields are opaque identifiers; the CLI enforces presence and
/// nothing validates their shape further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackUpdate {
    /// Name of the already-deployed CloudFormation stack.
    pub stack_name: String,

    /// S3 bucket receiving the packaged build artifacts.
    pub s3_bucket: String,
}

/// Update the named stack in place.
///
/// Fetches every parameter currently set on the stack, repackages build
/// artifacts, and redeploys with each parameter re-supplied explicitly so
/// none fall back to template defaults. Strictly linear: the first failing
/// step aborts the run and its error carries the child's exit code; later
/// steps are not invoked.
pub fn run_update(runner: &dyn CommandRunner, update: &StackUpdate) -> Result<()> {
    println!("*** Getting previous stack variables... ***");
    let parameter_overrides = fetch_parameter_overrides(runner, &update.stack_name)?;
    debug!(
        stack = %update.stack_name,
        count = parameter_overrides.len(),
        "re-supplying parameter overrides"
    );

    println!("*** Deploying stack... ***");
    sam::package(runner, &update.s3_bucket)?;
    sam::deploy(
        runner,
        &update.stack_name,
        &update.s3_bucket,
        &parameter_overrides,
    )?;

    println!("*** Stack successfully deployed. ***");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;
    use crate::fakes::{InvocationMode, ScriptedRunner};

    fn demo_update() -> StackUpdate {
        StackUpdate {
            stack_name: "demo".to_string(),
            s3_bucket: "artifact-bucket".to_string(),
        }
    }

    #[test]
    fn test_update_runs_fetch_package_deploy_in_order() {
        let runner = ScriptedRunner::new();
        runner.push_stdout(
            r#"{"Stacks":[{"Parameters":[
                {"ParameterKey":"Env","ParameterValue":"prod"},
                {"ParameterKey":"Size","ParameterValue":"large"}
            ]}]}"#,
        );
        runner.push_success();
        runner.push_success();

        run_update(&runner, &demo_update()).unwrap();

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 3);

        assert_eq!(invocations[0].program, "aws");
        assert_eq!(invocations[0].mode, InvocationMode::Capture);

        assert_eq!(invocations[1].program, "sam");
        assert_eq!(invocations[1].args[0], "package");

        assert_eq!(invocations[2].program, "sam");
        assert_eq!(invocations[2].args[0], "deploy");
        let tail = &invocations[2].args[invocations[2].args.len() - 2..];
        assert_eq!(tail, ["Env=\"prod\"", "Size=\"large\""]);
    }

    #[test]
    fn test_describe_failure_skips_package_and_deploy() {
        let runner = ScriptedRunner::new();
        runner.push_failure(255);

        let err = run_update(&runner, &demo_update()).unwrap_err();

        assert_eq!(err.exit_code(), 255);
        assert_eq!(runner.invocations().len(), 1, "only describe-stacks ran");
    }

    #[test]
    fn test_package_failure_skips_deploy_and_forwards_code() {
        let runner = ScriptedRunner::new();
        runner.push_stdout(r#"{"Stacks":[]}"#);
        runner.push_failure(7);

        let err = run_update(&runner, &demo_update()).unwrap_err();

        assert!(matches!(err, UpdateError::CommandFailed { code: 7, .. }));
        assert_eq!(err.exit_code(), 7);

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 2, "deploy must not run");
        assert_eq!(invocations[1].args[0], "package");
    }

    #[test]
    fn test_deploy_failure_forwards_code() {
        let runner = ScriptedRunner::new();
        runner.push_stdout(r#"{"Stacks":[]}"#);
        runner.push_success();
        runner.push_failure(2);

        let err = run_update(&runner, &demo_update()).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(runner.invocations().len(), 3);
    }
}
