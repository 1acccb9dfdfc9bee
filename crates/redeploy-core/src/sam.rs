//! SAM packaging and deployment invocations.

use crate::error::Result;
use crate::exec::CommandRunner;

/// Deployment template consumed by `sam package`. Fixed, not configurable.
pub const TEMPLATE_FILE: &str = "./cloudformation/template.yaml";

/// Rewritten template produced by `sam package` and consumed by
/// `sam deploy`. Fixed, not configurable.
pub const PACKAGED_TEMPLATE_FILE: &str = "./cloudformation/packaged.yaml";

/// Upload local build artifacts to `s3_bucket` and write a template
/// rewritten to reference the uploaded locations.
///
/// SAM's own progress output streams to the terminal.
pub fn package(runner: &dyn CommandRunner, s3_bucket: &str) -> Result<()> {
    runner.run(
        "sam",
        &[
            "package",
            "--template-file",
            TEMPLATE_FILE,
            "--output-template-file",
            PACKAGED_TEMPLATE_FILE,
            "--s3-bucket",
            s3_bucket,
        ],
    )
}

/// Deploy the packaged template to `stack_name`.
///
/// `CAPABILITY_NAMED_IAM` is acknowledged because the stack creates named
/// access-control resources. `--parameter-overrides` is always passed,
/// followed by every token in `parameter_overrides`, so no previously set
/// parameter falls back to its template default. The flag stays on the
/// command line even when the override list is empty.
pub fn deploy(
    runner: &dyn CommandRunner,
    stack_name: &str,
    s3_bucket: &str,
    parameter_overrides: &[String],
) -> Result<()> {
    let mut args = vec![
        "deploy",
        "--template-file",
        PACKAGED_TEMPLATE_FILE,
        "--stack-name",
        stack_name,
        "--s3-bucket",
        s3_bucket,
        "--capabilities",
        "CAPABILITY_NAMED_IAM",
        "--parameter-overrides",
    ];
    args.extend(parameter_overrides.iter().map(String::as_str));

    runner.run("sam", &args)
}
