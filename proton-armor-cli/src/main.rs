//! Command line front-end for the `proton-armor` codec.
//!
//! Armors binary data into `OpenPGP` ASCII armor and back, reading from a file
//! or stdin and writing to a file or stdout.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::debug;
use proton_armor::{ArmorHeaders, ArmorSettings, Armorer, BlockType, LineEnding};

#[derive(Parser)]
#[command(name = "proton-armor", version, about = "OpenPGP ASCII armor encoder and decoder")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Armor binary input
    Armor(ArmorArgs),
    /// Decode the first armored block of the input
    Dearmor(IoArgs),
    /// List every armored block of the input
    Inspect {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ArmorArgs {
    /// Block type label, e.g. MESSAGE, SIGNATURE, "PUBLIC KEY BLOCK"
    #[arg(short = 't', long = "type", default_value = "MESSAGE")]
    armor_type: String,

    /// Value of the Version header
    #[arg(long)]
    armor_version: Option<String>,

    /// Value of the Comment header
    #[arg(long)]
    comment: Option<String>,

    /// Base64 characters per body line
    #[arg(long, default_value_t = proton_armor::DEFAULT_LINE_LENGTH)]
    line_length: usize,

    /// Emit CRLF line breaks
    #[arg(long)]
    crlf: bool,

    #[command(flatten)]
    io: IoArgs,
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn read_text(path: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    open_input(path)?
        .read_to_string(&mut text)
        .context("armored input is not valid UTF-8 text")?;
    Ok(text)
}

fn armor(args: &ArmorArgs) -> Result<()> {
    let line_ending = if args.crlf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let armorer = Armorer::new(
        ArmorSettings::default()
            .with_line_length(args.line_length)
            .with_line_ending(line_ending),
    )?;
    let headers = ArmorHeaders::from_version_and_comment(
        args.armor_version.as_deref(),
        args.comment.as_deref(),
    );

    let mut input = open_input(args.io.input.as_deref())?;
    let output = open_output(args.io.output.as_deref())?;
    let mut writer = armorer.writer(output, BlockType::from_label(&args.armor_type), &headers)?;
    let copied = io::copy(&mut input, &mut writer).context("failed to armor input")?;
    writer.finish()?;
    debug!("armored {copied} bytes");
    Ok(())
}

fn dearmor(args: &IoArgs) -> Result<()> {
    let text = read_text(args.input.as_deref())?;
    let payload = Armorer::default().decode(&text)?;
    let mut output = open_output(args.output.as_deref())?;
    output.write_all(&payload)?;
    output.flush()?;
    debug!("dearmored {} bytes", payload.len());
    Ok(())
}

fn inspect(input: Option<&Path>) -> Result<()> {
    let text = read_text(input)?;
    let blocks = Armorer::default().decode_all(&text)?;
    let mut output = io::stdout().lock();
    for block in blocks {
        write!(output, "{}: {} bytes", block.block_type, block.payload.len())?;
        for (key, value) in &block.headers {
            write!(output, ", {key}={value:?}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Armor(args) => armor(args),
        Command::Dearmor(args) => dearmor(args),
        Command::Inspect { input } => inspect(input.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("proton-armor: {err:#}");
            ExitCode::FAILURE
        }
    }
}
