//! Binary entrypoint for the cachereport tool

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(e) = cachereport::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
