use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::artifacts::Artifacts;
use crate::constants::{exit_codes, verbosity, STDIN_INDICATOR};
use crate::error::Result;
use crate::git;
use crate::options::{Options, RawOptions};
use crate::project::Project;
use crate::recipe::{Recipe, StepContext};
use crate::renderer::MiniJinjaRenderer;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for dockerdev.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Freshly generated Rails application directory.
    #[arg(value_name = "APP_DIR")]
    pub app_dir: PathBuf,

    /// Database engine the application was generated with
    /// (postgresql or mysql; anything else skips provisioning).
    #[arg(short, long)]
    pub database: Option<String>,

    /// Application name (defaults to the APP_DIR file name).
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Options as a JSON map, or `-` to read from stdin.
    /// Explicit flags win over values given here.
    #[arg(short, long)]
    pub options: Option<String>,

    /// Do not run bundler or Rails generators.
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Applies the whole dockerdev recipe to the target application.
pub fn run(args: Args) -> Result<()> {
    let raw = match args.options {
        Some(options) => {
            let buf = if options == STDIN_INDICATOR {
                read_from(std::io::stdin())?
            } else {
                options
            };
            serde_json::from_str::<RawOptions>(&buf)?
        }
        None => RawOptions::default(),
    };

    let options = Options::resolve(
        &args.app_dir,
        args.app_name,
        args.database,
        raw,
        args.skip_install,
    )?;

    let project = Project::new(&args.app_dir, options.skip_install)?;
    let repo = git::open_or_init(project.root())?;
    let renderer = MiniJinjaRenderer::new();
    let artifacts = Artifacts::new(&options, &renderer);

    let ctx = StepContext { project: &project, options: &options, artifacts: &artifacts };
    Recipe::default().run(&ctx, &repo)?;

    println!("Applied the dockerdev recipe to {}.", project.root().display());
    Ok(())
}
