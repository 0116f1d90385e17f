use clap::Parser;
use rinha_cli::Cli;

fn main() {
    rinha_cli::init_tracing();
    let cli = Cli::parse();
    if let Err(e) = rinha_cli::run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
