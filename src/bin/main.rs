use tracing_subscriber::EnvFilter;

fn main() {
    let cli = wayline::cli::parse_from(std::env::args_os());
    init_tracing(cli.verbose);

    if let Err(e) = wayline::cli::run(cli) {
        tracing::error!(code = e.code(), "error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
