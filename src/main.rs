mod cargo;
mod checks;
mod commands;
mod core;
mod release;
mod utils;

use clap::{Parser, Subcommand};
use core::context::ReleaseContext;
use core::error::{RailError, print_error};
use std::path::PathBuf;

/// Version, verify and tag Cargo packages in named module sets
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Modset(ModsetCli),
}

#[derive(Parser)]
#[command(name = "modset")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct ModsetCli {
  /// Path to the versioning file (default: versions.yaml, versions.yml or versions.toml at the repo root)
  #[arg(short = 'v', long, global = true)]
  versioning_file: Option<PathBuf>,

  /// Print debug diagnostics to stderr
  #[arg(long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Check that every module is in exactly one set and set versions are consistent
  Verify,

  /// Prepare a branch that bumps a module set to its new version
  Prerelease {
    /// Name of the module set whose version is being changed
    #[arg(short, long)]
    module_set: String,
    /// Branch to base the prerelease branch on (default: current branch)
    #[arg(short, long)]
    from_existing_branch: Option<String>,
    /// Skip 'make lint' and 'make ci' (debugging only)
    #[arg(short, long)]
    skip_make: bool,
  },

  /// Tag every module of a set at a commit
  Tag {
    /// Name of the module set to tag
    #[arg(short, long)]
    module_set: String,
    /// Commit to tag (must be on the current branch)
    #[arg(short, long, required_unless_present = "delete_module_set_tags")]
    commit_hash: Option<String>,
    /// Delete the set's tags for its current version instead of creating them
    #[arg(short, long)]
    delete_module_set_tags: bool,
    /// GPG-sign the tags
    #[arg(long)]
    sign: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let CargoCli::Modset(cli) = CargoCli::parse();
  core::logging::init_logging(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(e.into()),
  };

  let ctx = match ReleaseContext::build(&cwd, cli.versioning_file.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Verify => commands::run_verify(&ctx),
    Commands::Prerelease {
      module_set,
      from_existing_branch,
      skip_make,
    } => commands::run_prerelease(&ctx, module_set, from_existing_branch, skip_make),
    Commands::Tag {
      module_set,
      commit_hash,
      delete_module_set_tags,
      sign,
    } => commands::run_tag(&ctx, module_set, commit_hash, delete_module_set_tags, sign),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RailError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
