use cidr_cli::cli::{self, Cli, Config};
use clap::Parser;
use std::process;
use tracing::{debug, Level};
use tracing_subscriber::fmt;

fn main() {
    let opts = Cli::parse();

    let level = match opts.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let config = Config::from(opts.command);
    debug!(?config);

    match cli::run(&config) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
