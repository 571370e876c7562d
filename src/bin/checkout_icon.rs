//! Renders an SVG icon to PNG the same way the button factory does.
//!
//! ```text
//! checkout-icon icons/pay.svg -o pay@2x.png --width 160 --height 44 --scale 2
//! ```

use std::path::PathBuf;

use checkout_button::{ButtonFactory, ButtonProfile, ButtonStyle, Color, IconSource};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Rasterize a checkout button icon")]
struct Args {
    /// SVG file to render. Uses the built-in icon when omitted.
    input: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long)]
    output: PathBuf,

    /// Width in points.
    #[arg(long, default_value_t = 160.0)]
    width: f32,

    /// Height in points.
    #[arg(long, default_value_t = 44.0)]
    height: f32,

    /// Pixels per point.
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Recolor every painted area with this color (hex or CSS name).
    #[arg(long)]
    monochrome: Option<Color>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let source = args.input.map_or(IconSource::BuiltIn, IconSource::SvgPath);
    let style = args.monochrome.map_or(ButtonStyle::Standard, ButtonStyle::Monochrome);
    let profile = ButtonProfile::new()
        .with_source(source)
        .with_size(args.width, args.height)
        .with_scale(args.scale)
        .with_style(style);

    let icon = ButtonFactory::new(profile).default_icon()?;
    icon.pixels().save(&args.output)?;

    let size = icon.dimensions();
    println!("wrote {}x{} icon to {}", size.width, size.height, args.output.display());
    Ok(())
}
