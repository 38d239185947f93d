//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use testbed_core::suites::{self, SuiteId};
use testbed_core::Parallelism;
use tracing::info;

use crate::backend::recording::{Call, Recorder};
use crate::backend::{DEFAULT_MAKE, MakeBackend, ProcessExecutor, resolve_workdir};
use crate::harness::{RunController, Workspace};

use super::{CliResult, ExitCode, WorkspaceArgs};

/// Run a registered suite under its lifecycle.
///
/// `jobs` overrides the suite's build parallelism. With `dry_run`, the lifecycle is driven through a
/// [`Recorder`] and the resulting steps are printed instead of executed.
pub fn run_suite(id: SuiteId, workspace: &WorkspaceArgs, jobs: Option<usize>, dry_run: bool) -> CliResult<ExitCode> {
    let suite = suites::info_for(id);
    let parallelism = jobs.map(Parallelism::from_jobs).unwrap_or(suite.parallelism);
    info!(suite = %id, lifecycle = %suite.lifecycle, tests = suite.tests.len(), "starting suite");

    if dry_run {
        let recorder = Recorder::default();
        RunController::for_suite(suite, &recorder, &recorder, &recorder)
            .with_parallelism(parallelism)
            .execute()?;
        println!("{}", render_plan(&recorder.calls(), &workspace.make, &workspace.workdir));
        return Ok(ExitCode::SUCCESS);
    }

    let workdir = resolve_workdir(&workspace.workdir)?;
    let make = MakeBackend::new(&workspace.make, &workdir);
    let executor = ProcessExecutor::new(&workdir);

    RunController::for_suite(suite, &make, &make, executor)
        .with_parallelism(parallelism)
        .execute()?;
    Ok(ExitCode::SUCCESS)
}

/// Clean the workspace without building or running anything.
pub fn reset_workspace(workspace: &WorkspaceArgs) -> CliResult<ExitCode> {
    let workdir = resolve_workdir(&workspace.workdir)?;
    info!(workdir = %workdir.display(), "resetting workspace");
    MakeBackend::new(&workspace.make, &workdir).reset()?;
    Ok(ExitCode::SUCCESS)
}

/// Print every suite, or the ordered tests of one suite.
pub fn list(suite: Option<SuiteId>) -> CliResult<ExitCode> {
    let listing = match suite {
        Some(id) => render_suite_tests(id),
        None => render_suite_list(),
    };
    println!("{listing}");
    Ok(ExitCode::SUCCESS)
}

/// One line per suite: name, lifecycle, build command, test count, description.
pub fn render_suite_list() -> String {
    suites::SUITES
        .iter()
        .map(|info| {
            let build = build_command(DEFAULT_MAKE, info.parallelism);
            format!(
                "{:<4} {:<7} {:<8} {:>2} tests  {}",
                info.canonical,
                info.lifecycle,
                build,
                info.tests.len(),
                info.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Test ids in run order, one per line, duplicates included.
pub fn render_suite_tests(id: SuiteId) -> String {
    suites::tests(id)
        .iter()
        .map(|test| test.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shell-style rendering of the steps a dry run recorded.
pub fn render_plan(calls: &[Call], make: &str, workdir: &Path) -> String {
    calls
        .iter()
        .map(|call| match call {
            Call::Reset => format!("{make} clean"),
            Call::Build(parallelism) => build_command(make, *parallelism),
            Call::Test(name) => workdir.join(name).display().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_command(make: &str, parallelism: Parallelism) -> String {
    match parallelism.make_flag() {
        Some(flag) => format!("{make} {flag}"),
        None => make.to_string(),
    }
}
