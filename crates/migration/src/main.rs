use juniscan_migration::cli::Cli;


fn init_logging(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or("info".to_string()),
    );

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .init();
    }
}


fn main() -> anyhow::Result<()> {
    let args = <Cli as clap::Parser>::parse();

    init_logging(args.json_log);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(juniscan_migration::run(&args))
}
