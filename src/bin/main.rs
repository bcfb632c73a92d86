use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use galaxy::driver::{self, Emit, Options};

#[derive(Parser)]
#[command(name = "galaxyc", version, about = "Translates galaxy programs to lazy Scheme")]
struct Cli {
    /// File of `name = expression` lines, `-` for stdin.
    input: PathBuf,

    /// Expression bound to `result`.
    result: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prelude loaded by the emitted program.
    #[arg(long, default_value = driver::DEFAULT_PRELUDE, conflicts_with = "no_prelude")]
    prelude: String,

    /// Don't emit the prelude load line.
    #[arg(long)]
    no_prelude: bool,

    #[arg(long, value_enum, default_value_t = EmitKind::Scheme)]
    emit: EmitKind,

    /// Raise the log level (`-v` debug, `-vv` trace). `RUST_LOG` takes
    /// precedence.
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum EmitKind {
    Scheme,
    Tree,
    Tokens,
}

impl From<EmitKind> for Emit {
    fn from(value: EmitKind) -> Self {
        match value {
            EmitKind::Scheme => Emit::Scheme,
            EmitKind::Tree => Emit::Tree,
            EmitKind::Tokens => Emit::Tokens,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("galaxyc: {error:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = Options {
        prelude: (!cli.no_prelude).then_some(cli.prelude),
        result: cli.result,
        emit: cli.emit.into(),
    };

    let input: Box<dyn Read> = if cli.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("failed to open {}", cli.input.display()))?;
        Box::new(file)
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    driver::translate(BufReader::new(input), BufWriter::new(output), &options)
        .with_context(|| format!("failed to translate {}", cli.input.display()))?;
    Ok(())
}
