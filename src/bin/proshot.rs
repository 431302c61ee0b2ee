//! CLI for Proshot - AI professional headshot generation.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use proshot::view::DualView;
use proshot::{
    GeminiModel, GeminiProvider, HeadshotStyle, Session, UploadedImage,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "proshot")]
#[command(about = "Generate a professional AI headshot from a portrait photo (Gemini)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a headshot from a photo in one shot
    Generate(GenerateArgs),

    /// Run an interactive session (open, style, generate, save, reset)
    Interactive(InteractiveArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Input portrait photo (PNG, JPEG, or WebP)
    #[arg(short, long)]
    input: PathBuf,

    /// Headshot style
    #[arg(short, long, value_enum)]
    style: StyleArg,

    /// Output file path
    #[arg(short, long, default_value = "ai-headshot.png")]
    output: PathBuf,

    /// Gemini model variant
    #[arg(long, value_enum, default_value = "flash")]
    model: ModelArg,
}

#[derive(Args)]
struct InteractiveArgs {
    /// Gemini model variant
    #[arg(long, value_enum, default_value = "flash")]
    model: ModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// Add a business suit
    Male,
    /// Keep existing clothing
    Female,
}

impl From<StyleArg> for HeadshotStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Male => HeadshotStyle::Male,
            StyleArg::Female => HeadshotStyle::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    /// Gemini 2.5 Flash Image (fast, economical)
    Flash,
    /// Gemini 3 Pro Image (highest quality)
    Pro,
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Flash => GeminiModel::Flash,
            ModelArg::Pro => GeminiModel::Pro,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args, cli.json).await,
        Commands::Interactive(args) => interactive(args).await,
    }
}

async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let provider = GeminiProvider::builder().model(args.model.into()).build()?;

    let image = UploadedImage::from_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let mut session = Session::new();
    session.select_image(image);
    session.select_style(args.style.into());
    session.generate(&provider).await;

    let Some(headshot) = session.generated() else {
        let message = session
            .error()
            .unwrap_or("generation produced no result")
            .to_string();
        anyhow::bail!("Generation failed: {message}");
    };

    headshot.save(&args.output)?;

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "output": args.output.display().to_string(),
            "size_bytes": headshot.size(),
            "format": headshot.format.extension(),
            "style": HeadshotStyle::from(args.style).as_str(),
            "model": headshot.metadata.model,
            "duration_ms": headshot.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Generated headshot: {} ({} bytes)",
            args.output.display(),
            headshot.size()
        );
        if let Some(duration) = headshot.metadata.duration_ms {
            println!("Duration: {}ms", duration);
        }
    }

    Ok(())
}

async fn interactive(args: InteractiveArgs) -> anyhow::Result<()> {
    let provider = GeminiProvider::builder().model(args.model.into()).build()?;
    let mut session = Session::new();

    println!("AI Headshot Generator");
    println!("Upload a photo and let the AI create a polished, studio-quality portrait.");
    println!();
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("proshot> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let arg = parts.next();

        match command {
            "open" => {
                let Some(path) = arg else {
                    println!("usage: open <path>");
                    continue;
                };
                match UploadedImage::from_file(path) {
                    Ok(image) => {
                        session.select_image(image);
                        println!("{}", DualView::from_session(&session).render());
                        println!("Now pick a style: style male | style female");
                    }
                    Err(e) => println!("Could not load photo: {e}"),
                }
            }
            "style" => {
                let style = match arg {
                    Some("male") => HeadshotStyle::Male,
                    Some("female") => HeadshotStyle::Female,
                    _ => {
                        println!("usage: style male|female");
                        continue;
                    }
                };
                if session.original().is_none() {
                    println!("Open a photo first (open <path>).");
                    continue;
                }
                session.select_style(style);
                println!("Style selected: {}", style.label());
            }
            "generate" => {
                if !session.can_generate() {
                    if session.original().is_none() {
                        println!("Open a photo first (open <path>).");
                    } else {
                        println!("Pick a style first (style male|female).");
                    }
                    continue;
                }
                println!("Generating your headshot... this may take a moment.");
                session.generate(&provider).await;
                match session.error() {
                    Some(e) => {
                        println!("Generation failed");
                        println!("{e}");
                    }
                    None => {
                        println!("{}", DualView::from_session(&session).render());
                        println!("Done. Use `save` to write it to disk.");
                    }
                }
            }
            "save" => {
                let Some(headshot) = session.generated() else {
                    println!("Nothing to save yet - generate a headshot first.");
                    continue;
                };
                let path = arg.unwrap_or("ai-headshot.png");
                match headshot.save(path) {
                    Ok(()) => println!("Saved {path} ({} bytes)", headshot.size()),
                    Err(e) => println!("Could not save: {e}"),
                }
            }
            "status" => {
                println!("{}", DualView::from_session(&session).render());
                if let Some(style) = session.style() {
                    println!("      Style: {}", style.label());
                }
                if let Some(e) = session.error() {
                    println!("      Error: {e}");
                }
            }
            "reset" => {
                session.reset();
                println!("Session cleared. Start over with open <path>.");
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command: {other} (try `help`)"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  open <path>         load a portrait photo (PNG, JPEG, or WebP)");
    println!("  style male|female   pick the headshot style (suit / keep clothes)");
    println!("  generate            request the AI headshot");
    println!("  save [path]         write the result (default: ai-headshot.png)");
    println!("  status              show the original/generated pair");
    println!("  reset               clear the session");
    println!("  quit                leave");
}
