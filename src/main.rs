use clap::{Parser, Subcommand};
use lightdeck::{config, form, output, render, scan, session};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("LIGHTDECK_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("LIGHTDECK_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lightdeck")]
#[command(about = "Single-page photography portfolio: render it, then replay visitors against it")]
#[command(long_about = "\
Single-page photography portfolio: render it, then replay visitors against it

Your filesystem is the data source. Images in hero/ become slides, each
directory under gallery/ becomes a filter category. Everything is ordered by
numeric prefix.

Content structure:

  content/
  ├── config.toml                    # Site config (optional)
  ├── hero/
  │   ├── 001-First-Light.jpg        # Slide (lowest number shows first)
  │   ├── 001-First-Light.txt        # Slide caption (optional)
  │   └── 002-Golden-Hour.jpg
  └── gallery/
      ├── 010-Wedding/               # Category \"wedding\"
      │   ├── 001-First-Dance.jpg    # Alt text \"First Dance\"
      │   └── 002-Vows.jpg
      └── 020-Engagement-Sessions/   # Category \"engagement-sessions\"
          └── 001-Park.jpg

Session scripts list timed visitor events (filter clicks, lightbox keys,
swipes, form submissions, scrolling) and are replayed on a virtual clock.

Set RUST_LOG=debug for engine tracing.
Run 'lightdeck gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".lightdeck-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Render the page and copy its images to the output directory
    Render,
    /// Replay a scripted visitor session against the rendered page
    Replay {
        /// Session script (TOML)
        session: PathBuf,
        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a contact form payload (JSON, camelCase keys)
    CheckForm {
        /// Form payload, e.g. {"firstName": "Jane", "email": "jane@example.com"}
        fields: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, has_config_file(&cli.source));
        }
        Command::Render => {
            println!("==> Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, has_config_file(&cli.source));

            println!("==> Rendering → {}", cli.output.display());
            let summary = render::render_site(&manifest, &cli.source, &cli.output)?;
            output::print_render_output(&summary);
        }
        Command::Replay {
            session: script_path,
            json,
        } => {
            let script = session::load_session(&script_path)?;
            let manifest = scan::scan(&cli.source)?;
            let page = render::render_page(&manifest).into_string();
            let transcript = session::replay(&script, &page, manifest.config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&transcript)?);
            } else {
                output::print_transcript(&transcript);
            }
        }
        Command::CheckForm { fields } => {
            let content = std::fs::read_to_string(&fields)?;
            let payload: form::ContactFields = serde_json::from_str(&content)?;
            let errors = form::validate(&payload);
            output::print_form_check(&errors);
            if !errors.is_empty() {
                return Err(format!("{} is not a valid submission", fields.display()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn has_config_file(source: &Path) -> bool {
    source.join("config.toml").is_file()
}
