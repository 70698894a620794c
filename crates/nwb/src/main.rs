//! nwb CLI - build React entry modules and scaffold front-end projects

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use nwb_core::build::{self, BuildArgs, CleanArgs, CommandBundler};
use nwb_core::{ClackPrompter, CreateArgs, NpmInstaller, ProjectCreator, Settings};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "nwb")]
#[command(about = "Build React entry modules and scaffold front-end projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a standalone React entry module
    BuildReact(CliBuildArgs),
    /// Delete build output
    CleanApp(CliCleanArgs),
    /// Create a project in a new directory
    New(CliCreateArgs),
    /// Create a project in the current directory
    Init(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliBuildArgs {
    /// Entry module
    pub entry: Option<String>,

    /// Output directory [default: dist]
    pub dist: Option<String>,

    /// Id of the element to mount the app on
    #[arg(long = "mount-id")]
    pub mount_id: Option<String>,

    /// Title of the generated HTML page
    #[arg(long)]
    pub title: Option<String>,

    /// Create a separate vendor bundle
    #[arg(long)]
    pub vendor: bool,

    /// Use preact-compat in place of React
    #[arg(long)]
    pub preact: bool,

    /// Print the bundler config as JSON instead of building
    #[arg(long = "print-config")]
    pub print_config: bool,

    /// Bundler command receiving the config file path [env: NWB_BUNDLER]
    #[arg(long)]
    pub bundler: Option<String>,
}

impl From<CliBuildArgs> for BuildArgs {
    fn from(args: CliBuildArgs) -> Self {
        BuildArgs {
            entry: args.entry,
            dist: args.dist,
            mount_id: args.mount_id,
            title: args.title,
            vendor: args.vendor,
            preact: args.preact,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliCleanArgs {
    /// Directory to delete [default: dist]
    pub dir: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project type: react-app, react-component, web-app or web-module
    pub project_type: Option<String>,

    /// Project name
    pub name: Option<String>,

    /// Create a UMD build (`--umd=false` to skip it)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub umd: Option<bool>,

    /// Global variable exported by the UMD build
    #[arg(short, long)]
    pub global: Option<String>,

    /// Don't prompt, use flags and defaults
    #[arg(short, long)]
    pub force: bool,

    /// Create an ES6 modules build (`--jsnext=false` to skip it)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub jsnext: Option<bool>,

    /// React version to install
    #[arg(long)]
    pub react: Option<String>,

    /// Local directory of project templates, one per project type [env: NWB_TEMPLATE_DIR]
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl CliCreateArgs {
    fn create_args(&self) -> CreateArgs {
        CreateArgs {
            umd: self.umd,
            global: self.global.clone(),
            force: self.force,
            jsnext: self.jsnext,
            react: self.react.clone(),
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    match args.command {
        Command::BuildReact(cli_args) => {
            let settings = Settings::resolve(None, cli_args.bundler.clone());
            let bundler = CommandBundler::new(settings.bundler_command);

            if cli_args.print_config {
                let pending = build::prepare_react_build(cli_args.into(), &cwd)?;
                println!("{}", pending.finalize(&bundler.env()).to_json()?);
                return Ok(());
            }

            build::build_react(cli_args.into(), &cwd, &bundler)
        }
        Command::CleanApp(cli_args) => {
            println!("{}", "nwb: clean-app".cyan());
            build::clean_app(&CleanArgs { dir: cli_args.dir }, &cwd)
        }
        Command::New(cli_args) => {
            let settings = Settings::resolve(cli_args.template_dir.clone(), None);
            let mut creator =
                ProjectCreator::new(settings.template_source, ClackPrompter, NpmInstaller);
            creator
                .new_project(
                    cli_args.project_type.as_deref(),
                    cli_args.name.as_deref(),
                    &cli_args.create_args(),
                    &cwd,
                )
                .await?;
            Ok(())
        }
        Command::Init(cli_args) => {
            let settings = Settings::resolve(cli_args.template_dir.clone(), None);
            let mut creator =
                ProjectCreator::new(settings.template_source, ClackPrompter, NpmInstaller);
            creator
                .init_project(
                    cli_args.project_type.as_deref(),
                    cli_args.name.as_deref(),
                    &cli_args.create_args(),
                    &cwd,
                )
                .await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let result = run(Args::parse()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match nwb_core::as_user_error(&err) {
                Some(user_error) => eprintln!("{}", user_error.to_string().red()),
                None => eprintln!("{} {:?}", "Error:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}
