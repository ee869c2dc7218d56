use clap::{Parser, Subcommand};
use qrsmith::decode::Decoder;
use qrsmith::render::{
    DotStyle, EcLevel, OutputFormat, QrRenderer, QrcodeRenderer, RenderOptions,
};
use qrsmith::{archive, batch, config, decode, history, output, parse, template};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Shared styling flags for commands that render codes.
///
/// Precedence: flag > config file > built-in default.
#[derive(clap::Args, Clone)]
struct StyleArgs {
    /// Output size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Dark module color (#rrggbb)
    #[arg(long)]
    foreground: Option<String>,

    /// Background color (#rrggbb)
    #[arg(long)]
    background: Option<String>,

    /// Error-correction level: L, M, Q, or H
    #[arg(long = "ec")]
    ec_level: Option<EcLevel>,

    /// Quiet zone width in modules
    #[arg(long)]
    margin: Option<u32>,

    /// Dot style: square, dots, or rounded
    #[arg(long)]
    dot_style: Option<DotStyle>,

    /// Logo image to overlay at the center (PNG/JPEG)
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output format: png, svg, pdf, or jpeg
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
#[command(name = "qrsmith")]
#[command(about = "QR code toolkit: generate, bulk-generate, decode")]
#[command(long_about = "\
QR code toolkit: generate, bulk-generate, decode

Single generation renders one styled code to a file. Bulk generation
reads 'content, filename' lines and packages every successful render
into one ZIP archive — failed lines are reported inline and never abort
the run.

Bulk input format (one code per line, filename optional):

  https://example.com, homepage
  hello world
  WIFI:T:WPA;S:Guest;P:pw;;, guest-wifi

Filenames are sanitized to [A-Za-z0-9_-]; lines without a filename get
qr-code-<N>. Styling (size, colors, error correction, margin, dot
style, logo) comes from flags, or from qrsmith.toml defaults.

Run 'qrsmith gen-config' to print a documented qrsmith.toml.")]
#[command(version)]
struct Cli {
    /// Config file with default styling
    #[arg(long, default_value = "qrsmith.toml", global = true)]
    config: PathBuf,

    /// Output directory for generated files
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one QR code to a file
    Generate {
        /// Content to encode (or template input, with --template)
        text: String,

        /// Payload template to apply (see 'qrsmith templates')
        #[arg(long)]
        template: Option<String>,

        /// Output filename without extension
        #[arg(long, default_value = "qr-code")]
        filename: String,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Bulk-generate codes from 'content, filename' lines into a ZIP
    Bulk {
        /// Input file with one code per line ('-' for stdin)
        input: PathBuf,

        /// Also write a JSON run manifest next to the archive
        #[arg(long)]
        manifest: bool,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Decode a QR code from an image file
    Decode {
        /// Image file (PNG/JPEG)
        image: PathBuf,
    },
    /// List available payload templates
    Templates,
    /// Print a stock qrsmith.toml with all options documented
    GenConfig,
}

/// JSON run report for a bulk batch, written with --manifest.
#[derive(Serialize)]
struct RunManifest {
    format: OutputFormat,
    total: usize,
    completed: usize,
    archive: Option<String>,
    items: Vec<qrsmith::types::WorkItem>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The default config path is optional; an explicitly passed one that
    // is missing should fail loudly.
    let tool_config = if cli.config.exists() {
        config::ToolConfig::load(&cli.config)?
    } else if cli.config != Path::new("qrsmith.toml") {
        return Err(format!("config file not found: {}", cli.config.display()).into());
    } else {
        config::ToolConfig::default()
    };
    let config_dir = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    match cli.command {
        Command::Generate {
            text,
            template,
            filename,
            style,
        } => {
            let (options, format) = resolve_style(&tool_config, &config_dir, &style)?;
            let payload = match template.as_deref() {
                Some(id) => {
                    let tpl = template::find_template(id)
                        .ok_or_else(|| format!("unknown template '{id}' (see 'qrsmith templates')"))?;
                    if !tpl.validate(&text) {
                        return Err(format!(
                            "input doesn't look like {} content. Example: {}",
                            tpl.name, tpl.placeholder
                        )
                        .into());
                    }
                    tpl.format(&text)
                }
                None => text,
            };

            let renderer = QrcodeRenderer::new();
            let rendered = renderer.render(&payload, &options, format)?;

            std::fs::create_dir_all(&cli.output)?;
            let out_name = format!("{}.{}", parse::sanitize_filename(&filename), format.extension());
            let out_path = cli.output.join(&out_name);
            std::fs::write(&out_path, &rendered.bytes)?;

            let session = history::SessionHistory::new()
                .record(history::HistoryEntry::new(payload, format));
            println!("Wrote {}", out_path.display());
            output::print_lines(&output::format_history(&session));
        }
        Command::Bulk {
            input,
            manifest,
            style,
        } => {
            let (options, format) = resolve_style(&tool_config, &config_dir, &style)?;
            let raw = read_input(&input)?;
            let items = parse::parse_bulk_input(&raw);
            if items.is_empty() {
                println!("No items to generate (input is empty)");
                return Ok(());
            }

            println!("==> Generating {} codes ({})", items.len(), format);
            let renderer = QrcodeRenderer::new();
            let results = batch::run_batch(&items, &options, format, &renderer, |done, total, item| {
                println!("{}", output::format_progress_line(done, total, item, format));
            });

            let completed = archive::completed_count(&results);
            let archive_name = if completed > 0 {
                let bytes = archive::build_archive(&results, format)?;
                std::fs::create_dir_all(&cli.output)?;
                let name = archive::archive_file_name();
                std::fs::write(cli.output.join(&name), bytes)?;
                Some(name)
            } else {
                None
            };

            println!();
            output::print_lines(&output::format_batch_summary(
                &results,
                archive_name.as_deref().map(|name| (name, completed)),
            ));

            let session = history::SessionHistory::new().record_batch(&results, format);
            output::print_lines(&output::format_history(&session));

            if manifest {
                let report = RunManifest {
                    format,
                    total: results.len(),
                    completed,
                    archive: archive_name.clone(),
                    items: results,
                };
                let manifest_name = match &archive_name {
                    Some(name) => format!("{}.json", name.trim_end_matches(".zip")),
                    None => "qr-codes-run.json".to_string(),
                };
                std::fs::create_dir_all(&cli.output)?;
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(cli.output.join(&manifest_name), json)?;
                println!("Manifest: {manifest_name}");
            }
        }
        Command::Decode { image } => {
            let bytes = std::fs::read(&image)?;
            let decoder = decode::RqrrDecoder::new();
            let content = decoder.decode(&bytes)?;
            println!("{}", output::format_decode_result(content.as_deref()));
            if content.is_none() {
                std::process::exit(1);
            }
        }
        Command::Templates => {
            output::print_lines(&output::format_templates());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Merge config-file defaults with command-line overrides.
fn resolve_style(
    tool_config: &config::ToolConfig,
    config_dir: &Path,
    args: &StyleArgs,
) -> Result<(RenderOptions, OutputFormat), Box<dyn std::error::Error>> {
    let mut options = tool_config.render_options(config_dir)?;

    if let Some(size) = args.size {
        options.size = size;
    }
    if let Some(foreground) = &args.foreground {
        options.foreground = foreground.clone();
    }
    if let Some(background) = &args.background {
        options.background = background.clone();
    }
    if let Some(level) = args.ec_level {
        options.ec_level = level;
    }
    if let Some(margin) = args.margin {
        options.margin = margin;
    }
    if let Some(style) = args.dot_style {
        options.dot_style = style;
    }
    if let Some(logo_path) = &args.logo {
        options.logo = Some(std::fs::read(logo_path)?);
    }
    // Flags bypass config-file validation; check the merged result.
    options.validate()?;

    let format = args
        .format
        .or(tool_config.format)
        .unwrap_or(OutputFormat::Png);
    Ok((options, format))
}

/// Read bulk input from a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
