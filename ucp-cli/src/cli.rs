use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ucp-audit",
    version,
    about = "Audit a website for Universal Content Protocol compliance"
)]
pub struct Cli {
    #[arg(help = "Website URL or bare hostname to audit")]
    pub url: String,
    #[arg(long, help = "Read configuration from this TOML file instead of the default location")]
    pub config: Option<PathBuf>,
    #[arg(long, short = 'j', help = "Print the score report as JSON")]
    pub json: bool,
    #[arg(long, short = 'v', help = "Log probe and scoring details to stderr")]
    pub verbose: bool,
}
