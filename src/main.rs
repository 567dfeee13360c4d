use blexit::{config, convert, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blexit")]
#[command(about = "Convert a WordPress export into markdown posts and comments")]
#[command(long_about = "\
Convert a WordPress export into markdown posts and comments

Every <item> whose wp:post_type is \"post\" becomes one file with YAML front
matter, and each of its comments becomes a file of its own:

  public/
  ├── posts/
  │   └── 2023-06-my-post.md       # <YYYY>-<MM>-<permalink tail>
  └── comments/
      ├── 42-0.md                  # <post id>-<n>, in source order
      └── 42-1.md

Pages, attachments, and other item types are skipped. Missing fields get
placeholders (\"UNKNOWN\", or 1970-01-01 for dates) instead of failing.

Settings are read from blexit.toml when present; flags override it.
Run 'blexit gen-config' to generate a documented blexit.toml.
Set RUST_LOG=debug to see every skipped item.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// WXR export to read (overrides `input`)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Directory for post files (overrides `posts_dir`)
    #[arg(long, global = true)]
    posts_dir: Option<PathBuf>,

    /// Directory for comment files (overrides `comments_dir`)
    #[arg(long, global = true)]
    comments_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the export and write all files (the default)
    Build,
    /// List the posts that would be written, without writing anything
    Scan {
        /// Print the extracted records as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Like scan, but fail if two posts would write the same file
    Check,
    /// Print a stock blexit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let config = resolve_config(&cli)?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_generate_event(&event));
                }
            });
            let result = convert::convert(&config, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_summary(&result?);
        }
        Command::Scan { json } => {
            let config = resolve_config(&cli)?;
            let manifest = scan::scan(&config.input)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest);
            }
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            println!("==> Checking {}", config.input.display());
            let manifest = scan::scan(&config.input)?;
            output::print_scan_output(&manifest);
            if !manifest.collisions.is_empty() {
                return Err(format!(
                    "{} slug collision(s) found",
                    manifest.collisions.len()
                )
                .into());
            }
            println!("==> Export is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `--config` over stock defaults, then apply the path flags.
fn resolve_config(cli: &Cli) -> Result<config::ExportConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(dir) = &cli.posts_dir {
        config.posts_dir = dir.clone();
    }
    if let Some(dir) = &cli.comments_dir {
        config.comments_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Diagnostics go to stderr so they never mix with the progress lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
