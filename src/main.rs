//! # cardcode CLI
//!
//! Command-line front end for the loyalty-card barcode engine.
//!
//! ## Usage
//!
//! ```bash
//! # List supported formats
//! cardcode formats
//!
//! # Show the module pattern and check digit
//! cardcode encode 590123412345
//!
//! # Preview a Code128 symbol in the terminal
//! cardcode render --format code128 "MEMBER-0042"
//!
//! # Save as PNG, or emit the legacy <img> markup
//! cardcode render --png card.png 590123412345
//! cardcode render --html 590123412345
//!
//! # Run a JSON request as issued by the card UI
//! cardcode request '{"value":"AB12","format":"code128","moduleWidthPx":2}'
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cardcode::{
    CardcodeError,
    render::{self, Rendered, TilePalette},
    symbol::{self, Format, SymbolRequest},
};

/// cardcode - offline EAN-13 / Code128-B barcode engine
#[derive(Parser, Debug)]
#[command(name = "cardcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported barcode formats
    Formats,

    /// Encode a value and print its module pattern
    Encode {
        /// Value to encode
        value: String,

        /// Barcode format (ean13, code128)
        #[arg(long, short, default_value = "ean13")]
        format: String,
    },

    /// Compose a barcode image from tiles
    Render {
        /// Value to encode
        value: String,

        /// Barcode format (ean13, code128)
        #[arg(long, short, default_value = "ean13")]
        format: String,

        /// Width of one module in pixels (defaults per format)
        #[arg(long)]
        module_width: Option<u32>,

        /// Bar height in pixels (defaults per format)
        #[arg(long)]
        height: Option<u32>,

        /// Write a PNG image to FILE
        #[arg(long, value_name = "FILE", conflicts_with_all = ["html", "json"])]
        png: Option<PathBuf>,

        /// Draw bars directly instead of concatenating tiles (PNG only)
        #[arg(long, requires = "png")]
        raster: bool,

        /// Print legacy <img> tile markup
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the encoded symbol and tile list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a JSON request ({"value", "format", "moduleWidthPx", "heightPx"})
    Request {
        /// Request JSON
        json: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CardcodeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            println!("Available formats:");
            for format in Format::ALL {
                let (module_width, height) = format.default_dimensions();
                println!(
                    "  {:<8} {} (default {}px/module, {}px tall)",
                    format.name(),
                    format.description(),
                    module_width,
                    height
                );
            }
        }

        Commands::Encode { value, format } => {
            let symbol = symbol::encode_named(&format, &value)?;
            println!("Format:   {}", symbol.format);
            println!("Text:     {}", symbol.display_text);
            println!("Checksum: {}", symbol.checksum);
            println!("Modules:  {}", symbol.bits.len());
            println!("{}", symbol.bits);
        }

        Commands::Render {
            value,
            format,
            module_width,
            height,
            png,
            raster,
            html,
            json,
        } => {
            let mut request = SymbolRequest::named(value, format);
            request.module_width_px = module_width;
            request.height_px = height;

            let rendered = render::render(&request)?;

            if let Some(path) = png {
                save_png(&path, &rendered, raster)?;
                println!("Saved to {}", path.display());
            } else if html {
                println!("{}", rendered.image.to_legacy_html(TilePalette::shared()));
            } else if json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                print_preview(&rendered);
            }
        }

        Commands::Request { json } => {
            let request = SymbolRequest::from_json(&json)?;
            let rendered = render::render(&request)?;
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }

    Ok(())
}

/// Save a rendered symbol as PNG
fn save_png(path: &Path, rendered: &Rendered, raster: bool) -> Result<(), CardcodeError> {
    let img = if raster {
        render::rasterize(
            &rendered.symbol.bits.padded(5),
            rendered.image.module_width_px(),
            rendered.image.height_px(),
        )?
    } else {
        rendered.image.to_image(TilePalette::shared())
    };

    let png = render::to_png(&img)?;
    std::fs::write(path, png)?;
    Ok(())
}

/// Terminal preview: a few rows of block characters, one per module
fn print_preview(rendered: &Rendered) {
    let row: String = rendered
        .image
        .bits()
        .iter()
        .map(|bar| if bar { '█' } else { ' ' })
        .collect();

    for _ in 0..4 {
        println!("{}", row);
    }
    println!("{}", rendered.symbol.display_text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_conflicts_with_text_outputs() {
        for flag in ["--html", "--json"] {
            let parsed = Cli::try_parse_from(["cardcode", "render", "--png", "out.png", flag, "123"]);
            assert!(parsed.is_err(), "--png with {} should be rejected", flag);
        }
        assert!(Cli::try_parse_from(["cardcode", "render", "--png", "out.png", "--raster", "123"]).is_ok());
    }

    #[test]
    fn test_raster_requires_png() {
        assert!(Cli::try_parse_from(["cardcode", "render", "--raster", "123"]).is_err());
    }
}
