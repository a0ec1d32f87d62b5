use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "webp_converter")]
#[command(about = "Convert PNG, JPEG, BMP and ICO images to WebP next to the originals")]
#[command(version)]
pub struct Cli {
    /// Image files to convert
    pub files: Vec<PathBuf>,

    /// Convert every matching image under this directory (recursive)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Extensions picked up with --dir
    #[arg(short, long = "ext", value_delimiter = ',', default_value = "png,jpeg,jpg")]
    pub extensions: Vec<String>,

    /// Overwrite existing .webp files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Quality (0-100), ignored in lossless mode
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(i32).range(0..=100))]
    pub quality: i32,

    /// Lossless conversion
    #[arg(short, long)]
    pub lossless: bool,

    /// Number of files converted in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write a JSON report of every file to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Do not print the result summary at the end
    #[arg(long)]
    pub no_summary: bool,

    /// Only log warnings and errors
    #[arg(long)]
    pub quiet: bool,
}
