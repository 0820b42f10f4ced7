use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use git_tag_version::cli::{Args, Workflow};
use git_tag_version::config::{self, Config};
use git_tag_version::git::{Git2TagSource, GitCliTagSource, TagSource};
use git_tag_version::output::{FileSink, WriterSink};
use git_tag_version::{logging, ui, TagVersionError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("{:#}", e);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::display_error(&format!("{:#}", err));
            let code = err
                .downcast_ref::<TagVersionError>()
                .map_or(1, TagVersionError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // Configuration errors surface here, before any tag is read
    let settings = config::load_settings(args.config.as_deref())?.overlay(args.settings());
    let workflow = Workflow::new(Config::from_settings(settings)?)?;

    let source: Box<dyn TagSource> = if args.git_cli {
        Box::new(GitCliTagSource::new(&args.repo))
    } else {
        Box::new(Git2TagSource::open(&args.repo))
    };

    let resolution = workflow.run(source.as_ref()).await?;

    for warning in &resolution.warnings {
        ui::display_boundary_warning(warning);
    }
    if workflow.config().increment_mode.is_active() {
        ui::display_status(&format!(
            "Applying {} increment",
            workflow.config().increment_mode
        ));
    }
    ui::display_resolution(&resolution.found, resolution.next.as_ref());

    match &args.output {
        Some(path) => {
            let mut sink = FileSink::append(path)
                .with_context(|| format!("cannot open output file {}", path.display()))?;
            resolution
                .write_to(&mut sink)
                .with_context(|| format!("cannot write outputs to {}", path.display()))?;
        }
        None => {
            let mut sink = WriterSink::new(std::io::stderr().lock());
            resolution
                .write_to(&mut sink)
                .context("cannot write outputs to stderr")?;
        }
    }

    Ok(())
}
