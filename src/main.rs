mod riverdb;

use tracing::{info, info_span, Level};
use tracing_subscriber::FmtSubscriber;

use crate::riverdb::config::load_config;
use crate::riverdb::common::coarse_monotonic_clock_updater;
use crate::riverdb::pg::{BackendConn, XRouterSession};

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let _span = info_span!("startup").entered();

    let conf = load_config("riverdb.yaml").expect("could not load config");

    let tokio = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("could not create tokio runtime");

    tokio.block_on(async move {
        tokio::spawn(coarse_monotonic_clock_updater());

        match connect_session(conf).await {
            Ok(session) => {
                info!(state = %session.state(), "routing session established");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to establish routing session");
            }
        }

        // Accepting client connections and driving sessions from socket readiness is
        // left to whatever embeds this crate; there's no listener here.
    });
}

/// Connects to every configured backend (main first, then each secondary in order),
/// drives each through authentication and startup, and assembles the routing session
/// that will serve one client.
async fn connect_session(conf: &'static crate::riverdb::config::Settings) -> crate::riverdb::common::Result<XRouterSession> {
    let xrouter = &conf.xrouter;
    let connect_timeout = std::time::Duration::from_millis(xrouter.connect_timeout_ms);

    let mut backends = Vec::with_capacity(1 + xrouter.secondaries.len());
    let mut main = BackendConn::connect(&xrouter.main, &conf.app_name, connect_timeout).await?;
    main.handshake().await?;
    backends.push(main);
    for secondary in &xrouter.secondaries {
        let mut backend = BackendConn::connect(secondary, &conf.app_name, connect_timeout).await?;
        backend.handshake().await?;
        backends.push(backend);
    }

    XRouterSession::new(backends, xrouter)
}
