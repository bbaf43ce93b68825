use award_deck::{archive, config, copy, layout, manual, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "award-deck")]
#[command(about = "Assemble contest award photos into an ordered slideshow")]
#[command(long_about = "\
Assemble contest award photos into an ordered slideshow

One directory per category holds that category's winning photos. `copy`
renames them into a single presentation directory whose filename order is
the slideshow order.

Directory structure:

  Categories/                      # created by `init` from the category list
  ├── 3/
  │   ├── 1-third.jpg              # filename order = presentation order
  │   ├── 2-second.jpg
  │   └── 3-first.jpg
  ├── 12a/
  └── 900/                         # 900 and up: special awards
  Slides/                          # optional, see --slides
  ├── 0003-0.jpg
  └── 0012a.jpg
  Presentation/                    # written by `copy`
  ├── 0003-0.jpg                   # slide
  ├── 0003-1.jpg
  ├── 0003-2.jpg
  └── 0003-3.jpg

Run 'award-deck manual' for the full manual.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; missing file = defaults)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct InitArgs {
    /// Comma-separated category list; the first field is the category id
    datafile: PathBuf,
    /// Categories directory [default: Categories]
    categories_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CopyArgs {
    /// Categories directory [default: Categories]
    categories_dir: Option<PathBuf>,
    /// Presentation directory [default: Presentation]
    presentation_dir: Option<PathBuf>,
    /// Only copy these categories (repeatable, comma-separated)
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,
    /// Directory of per-category slides
    #[arg(long)]
    slides: Option<PathBuf>,
    /// Leave out the first N photos of every category
    #[arg(long)]
    skip: Option<usize>,
    /// Also print the anomaly report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct CleanupArgs {
    /// Directories to remove [default: both Categories and Presentation]
    #[arg(num_args = 0..=2)]
    paths: Vec<PathBuf>,
}

#[derive(clap::Args)]
struct ArchiveArgs {
    /// Presentation directory [default: Presentation]
    presentation_dir: Option<PathBuf>,
    /// Archive tool, by name or path [default: zip, then tar]
    #[arg(long)]
    command: Option<PathBuf>,
    /// Archive name without suffix [default: presentation directory name]
    #[arg(long)]
    file: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create category directories from a category list
    Init(InitArgs),
    /// Copy category photos into the presentation directory
    Copy(CopyArgs),
    /// Remove the categories and/or presentation directories
    Cleanup(CleanupArgs),
    /// Pack the presentation directory into a zip or tgz archive
    Archive(ArchiveArgs),
    /// Show the manual
    Manual,
    /// Print a stock award-deck.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Init(args) => {
            let config = config::load_config(&cli.config)?;
            let cats_dir = args.categories_dir.unwrap_or(config.categories_dir);
            let summary = layout::init(&args.datafile, &cats_dir)?;
            output::print_init(&summary, &cats_dir);
        }
        Command::Copy(args) => {
            let config = config::load_config(&cli.config)?;
            let cats_dir = args.categories_dir.unwrap_or(config.categories_dir);
            let presentation_dir = args.presentation_dir.unwrap_or(config.presentation_dir);
            let options = copy::CopyOptions {
                only: args
                    .only
                    .iter()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect(),
                skip: args.skip.unwrap_or(config.copy.skip),
                slides_dir: args.slides.or(config.copy.slides_dir),
                min_entries: config.copy.min_entries,
                special_award_from: config.copy.special_award_from,
            };

            let report = copy::run_copy(&cats_dir, &presentation_dir, &options, &mut |event| {
                output::print_copy_event(&event)
            })?;
            output::print_report(&report, options.min_entries);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Cleanup(args) => {
            let config = config::load_config(&cli.config)?;
            let targets = layout::cleanup_targets(
                &args.paths,
                &config.categories_dir,
                &config.presentation_dir,
            );
            let removals = layout::cleanup(&targets)?;
            output::print_cleanup(&removals);
        }
        Command::Archive(args) => {
            let config = config::load_config(&cli.config)?;
            let presentation_dir = args.presentation_dir.unwrap_or(config.presentation_dir);
            let requested = args.command.or(config.archive.command);
            let path_var = std::env::var_os("PATH");
            let tool = archive::resolve_tool(requested.as_deref(), path_var.as_deref())?;
            let file = args.file.or(config.archive.file);
            let written = archive::create_archive(
                &archive::SystemRunner,
                &tool,
                &presentation_dir,
                file.as_deref(),
            )?;
            output::print_archive(&written);
        }
        Command::Manual => manual::show_manual()?,
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Warnings and up by default, `RUST_LOG` to override, `--verbose` for
/// debug output from this crate.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_module("award_deck", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
