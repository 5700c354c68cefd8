//! `rdjson` fetches a JSON document from a URL (or reads a file / stdin), parses it and
//! pretty-prints the resulting value tree.
use std::io;
use std::process::ExitCode;

use clap::{Parser as ClapParser, ValueEnum};
use rdjson::decoders::Encoding;
use rdjson::{JsonValue, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_SOURCE: &str = "https://api.github.com/users/ryym";

#[derive(Debug, Copy, Clone, ValueEnum)]
enum EncodingArg {
    Utf8,
    Ascii,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => Encoding::Utf8,
            EncodingArg::Ascii => Encoding::Ascii,
        }
    }
}

#[derive(Debug, ClapParser)]
#[command(name = "rdjson", version, about = "Parse and pretty-print a JSON document")]
struct Cli {
    /// An http(s) URL, a file path, or `-` for stdin
    #[arg(default_value = DEFAULT_SOURCE)]
    source: String,

    /// Encoding used to decode file and stdin input
    #[arg(long, value_enum, default_value = "utf8")]
    encoding: EncodingArg,
}

fn fetch(url: &str) -> Result<String, String> {
    debug!(url, "fetching document");
    let response = ureq::get(url)
        .call()
        .map_err(|err| format!("request to {} failed: {}", url, err))?;
    response
        .into_string()
        .map_err(|err| format!("failed to read response from {}: {}", url, err))
}

fn run(cli: &Cli) -> Result<Option<JsonValue<'static>>, String> {
    let parser = Parser::with_encoding(cli.encoding.into());
    let parsed = if cli.source.starts_with("http://") || cli.source.starts_with("https://") {
        let body = fetch(&cli.source)?;
        parser
            .parse_str(&body)
            .map(|value| value.map(JsonValue::into_owned))
    } else if cli.source == "-" {
        parser.parse_reader(io::stdin().lock())
    } else {
        parser.parse_file(&cli.source)
    };
    parsed.map_err(|err| format!("{}: {}", cli.source, err))
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Some(value)) => {
            println!("{:#?}", value);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            debug!(source = %cli.source, "input contained no value");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
