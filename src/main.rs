use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, warn};

use bencoder::config::Config;
use bencoder::engine;

#[derive(Parser)]
#[command(
    name = "bencoder",
    version,
    about = "Decode, encode and inspect bencoded data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a bencoded string and print it as JSON
    Decode { input: String },
    /// Encode a JSON document into canonical bencode
    Encode { json: String },
    /// Decode a bencoded file and print a summary plus JSON
    Inspect { path: PathBuf },
}

enum Output {
    Text(String),
    Bytes(Vec<u8>),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|err| {
        warn!("could not load config, using defaults: {}", err);
        Config::default()
    });

    let result = match cli.command {
        Command::Decode { input } => engine::decode_command(&input, &config).map(Output::Text),
        Command::Encode { json } => engine::encode_command(&json, &config).map(Output::Bytes),
        Command::Inspect { path } => engine::inspect_command(&path, &config).map(Output::Text),
    };

    match result {
        Ok(Output::Text(text)) => println!("{}", text),
        Ok(Output::Bytes(bytes)) => {
            // bencoded output may not be valid UTF-8; write it raw
            let mut stdout = std::io::stdout();
            if let Err(err) = stdout
                .write_all(&bytes)
                .and_then(|_| stdout.write_all(b"\n"))
            {
                error!("failed to write output: {}", err);
                std::process::exit(1);
            }
        }
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(1);
        }
    }
}
