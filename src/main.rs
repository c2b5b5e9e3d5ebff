use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_impact::analyzer::{CommandClassifier, ImpactClassifier, RuleCascadeClassifier};
use release_impact::cli::{
    run_impact_workflow, run_notes_workflow, ImpactWorkflowArgs, NotesWorkflowArgs,
};
use release_impact::config;
use release_impact::git::Git2Repository;
use release_impact::notes::NotesVariant;
use release_impact::{ui, ReleaseImpactError};

#[derive(clap::Parser)]
#[command(
    name = "release-impact",
    version,
    about = "Explain the release impact of a commit message and build release notes",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(help = "Repository root used to discover the release configuration [default: .]")]
    repo_root: Option<PathBuf>,

    #[arg(help = "File containing the commit message to classify")]
    message_file: Option<PathBuf>,

    #[arg(long, help = "Release configuration file, bypassing discovery")]
    release_config: Option<PathBuf>,

    #[arg(long, help = "External classifier command (receives JSON on stdin)")]
    classifier_cmd: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render release notes for the commits since the last release tag
    Notes(NotesCommand),
}

#[derive(clap::Args)]
struct NotesCommand {
    #[arg(long, default_value = ".", help = "Repository to read history from")]
    repo: PathBuf,

    #[arg(long, help = "Tag to start from [default: latest tag matching tagFormat]")]
    from: Option<String>,

    #[arg(long, help = "Version label for the heading [default: next version]")]
    label: Option<String>,

    #[arg(long, value_enum, default_value_t = NotesVariant::Changelog)]
    variant: NotesVariant,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Release configuration file, bypassing discovery")]
    release_config: Option<PathBuf>,

    #[arg(long, help = "External classifier command (receives JSON on stdin)")]
    classifier_cmd: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        let code = exit_code(&err);
        match code {
            3 => ui::display_warning(&format!("{:#}", err)),
            _ => ui::display_error(&format!("{:#}", err)),
        }
        std::process::exit(code);
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ReleaseImpactError>()
        .map(ReleaseImpactError::exit_code)
        .unwrap_or(1)
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Notes(notes)) => run_notes(notes),
        None => run_impact(
            args.repo_root.unwrap_or_else(|| PathBuf::from(".")),
            args.message_file,
            args.release_config,
            args.classifier_cmd.as_deref(),
        ),
    }
}

fn build_classifier(command: Option<&str>, working_dir: &Path) -> Result<Box<dyn ImpactClassifier>> {
    match command {
        Some(command_line) => Ok(Box::new(CommandClassifier::from_command_line(
            command_line,
            working_dir,
        )?)),
        None => Ok(Box::new(RuleCascadeClassifier::new())),
    }
}

fn run_impact(
    repo_root: PathBuf,
    message_file: Option<PathBuf>,
    release_config: Option<PathBuf>,
    classifier_cmd: Option<&str>,
) -> Result<()> {
    let classifier = build_classifier(classifier_cmd, &repo_root)?;
    let args = ImpactWorkflowArgs {
        repo_root,
        message_file,
        release_config,
    };

    let result = run_impact_workflow(&args, classifier.as_ref())?;
    print!("{}", ui::format_impact_report(&result));
    Ok(())
}

fn run_notes(command: NotesCommand) -> Result<()> {
    let config = config::load_config(command.config.as_deref())?;
    let classifier = build_classifier(command.classifier_cmd.as_deref(), &command.repo)?;
    let repo = Git2Repository::open(&command.repo)
        .with_context(|| format!("cannot open repository at {}", command.repo.display()))?;

    let args = NotesWorkflowArgs {
        repo_root: command.repo,
        from_tag: command.from,
        label: command.label,
        variant: command.variant,
        release_config: command.release_config,
    };

    let report = run_notes_workflow(&args, &repo, &config, classifier.as_ref())?;
    ui::display_status(&ui::format_notes_summary(&report));
    print!("{}", report.document);
    Ok(())
}
