use clap::Parser;
use questlab::{db::Db, services::Latency, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Mark cookies `Secure`. Enable when served over HTTPS.
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,

    /// Delay, in milliseconds, applied to accepted form submissions.
    #[arg(long, env, default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,tower_http=debug,questlab=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new()?;
    let state = AppState::new(db, args.secure_cookies, Latency::from_millis(args.latency_ms));
    let app = questlab::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
