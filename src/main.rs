use microserve::config::Config;
use microserve::handlers;
use microserve::server::{Router, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let files = handlers::serve_files(cfg.root_dir.clone());
    let router = Router::new()
        .route("GET", "/", handlers::root())
        .route("GET", "/echo/*", handlers::echo())
        .route("GET", "/user-agent", handlers::user_agent())
        .route("GET", "/files/*", files.clone())
        .route("POST", "/files/*", files);

    let mut server = Server::new(router).idle_timeout(cfg.idle_timeout());
    if let Some(n) = cfg.max_connections {
        server = server.max_connections(n);
    }

    tokio::select! {
        res = server.run(&cfg.listen_addr) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
