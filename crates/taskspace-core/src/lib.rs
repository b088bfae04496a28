pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;

use anyhow::{
  Context,
  anyhow
};
use clap::Parser;
use taskspace_shared::Controller;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskspace CLI"
  );
  debug!(
    overrides = cli.rc_overrides.len(),
    "parsed rc overrides"
  );

  let mut cfg = config::Config::load(
    cli.taskspacerc.as_deref()
  )?;
  cfg
    .apply_overrides(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
    .context("invalid --rc override")?;

  let data_dir = cfg
    .data_dir(cli.data.as_deref())
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  let mut controller =
    Controller::bootstrap(storage);
  let renderer =
    render::Renderer::new(&cfg);

  let command = match cli.command {
    | Some(command) => command,
    | None => {
      cli::Command::from_default_name(
        &cfg.default_command
      )
      .ok_or_else(|| {
        anyhow!(
          "unsupported default.command: \
           {}",
          cfg.default_command
        )
      })?
    }
  };

  commands::dispatch(
    &mut controller,
    &renderer,
    cli.workspace.as_deref(),
    command
  )?;

  info!("done");
  Ok(())
}
