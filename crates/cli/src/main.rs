use stockroom_infra::Config;

fn main() {
    stockroom_observability::init();

    let config = Config::from_env();
    tracing::debug!(?config, "starting demonstration");

    // The demonstration always exits 0; output failures are only logged.
    let stdout = std::io::stdout();
    if let Err(e) = stockroom_cli::demo::run(&config, &mut stdout.lock()) {
        tracing::error!(error = ?e, "demonstration aborted");
    }
}
