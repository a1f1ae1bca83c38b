use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::Serialize;

use kanjiqr::{stages, QRBuilder};

#[derive(Parser)]
#[command(name = "kanjiqr", version, about = "Kanji mode QR code encoder, one stage at a time")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress each kanji to its 13 bit value
    Compress { text: String },
    /// Assemble the 19 data codewords
    Data { text: String },
    /// Compute the error correction codewords of 19 data codewords
    Ecc {
        digits: String,
        /// Read hex digits instead of binary digits
        #[arg(long)]
        hex: bool,
    },
    /// Mask a 26 byte codeword
    Mask {
        digits: String,
        #[arg(long)]
        hex: bool,
    },
    /// Place masked codeword bits into the module matrix
    Matrix { bits: String },
    /// Run the whole pipeline
    Encode {
        text: String,
        /// Module size in pixels or characters
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
        /// Save the symbol as an image
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print every stage record instead of the symbol
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compress { text } => print_json(&stages::compress(&text)?),
        Command::Data { text } => print_json(&stages::build_data_codewords(&text)?),
        Command::Ecc { digits, hex } => {
            let rec =
                if hex { stages::encode_ecc_hex(&digits)? } else { stages::encode_ecc(&digits)? };
            print_json(&rec)
        }
        Command::Mask { digits, hex } => {
            let rec =
                if hex { stages::apply_mask_hex(&digits)? } else { stages::apply_mask(&digits)? };
            print_json(&rec)
        }
        Command::Matrix { bits } => print_json(&stages::render_matrix(&bits)?),
        Command::Encode { text, scale, output, json } => encode_cmd(&text, scale, output, json),
    }
}

fn encode_cmd(
    text: &str,
    scale: u32,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let builder = QRBuilder::new(text);
    if json {
        return print_json(&builder.report()?);
    }

    let qr = builder.build()?;
    match output {
        Some(path) => {
            qr.to_image(scale).save(&path)?;
            info!("Saved QR to {}", path.display());
        }
        None => println!("{}", qr.to_str(scale as usize)),
    }
    Ok(())
}

fn print_json<T: Serialize>(record: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
