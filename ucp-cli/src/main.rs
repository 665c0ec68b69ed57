use clap::Parser;
use ucp_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = ucp_cli::run(cli).await {
        eprintln!("ucp-audit error: {err:#}");
        std::process::exit(1);
    }
}
