use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use echoverse::{Config, Responder};
use miette::{IntoDiagnostic, Result};
use tower_http::services::ServeDir;

mod error;
mod routes;

use routes::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Echoverse API server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "ECHOVERSE_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Serve the built frontend from this directory
    #[arg(long, env = "ECHOVERSE_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    echoverse::init_tracing("info,tower_http=debug");

    let args = Args::parse();

    let config = Config::from_env()?;
    let client = config.client()?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "model client ready");

    let state = AppState {
        generator: Arc::new(Responder::new(client)),
    };

    let mut app = routes::router(state);
    if let Some(dir) = args.static_dir {
        tracing::info!(dir = %dir.display(), "serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    tracing::info!(addr = %args.bind, "listening");
    axum::Server::bind(&args.bind)
        .serve(app.into_make_service())
        .await
        .into_diagnostic()?;

    Ok(())
}
