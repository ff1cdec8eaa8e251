pub mod riverdb;

pub use crate::riverdb::*;

use std::io;

use tokio::runtime::{Runtime, Builder};
use tracing_subscriber::FmtSubscriber;
use tracing::{info, Level};

use crate::riverdb::config::{Settings, load_config};
use crate::riverdb::common::{Result, coarse_monotonic_clock_updater};
use crate::riverdb::pg::{BackendConn, XRouterSession};

pub fn init_tracing(max_level: Level) {
    let subscriber = FmtSubscriber::builder()
        // all spans/events with a level higher than TRACE (e.g, debug, info, warn, etc.)
        // will be written to stdout.
        .with_max_level(max_level)
        // completes the builder.
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}

/// Loads the configuration from `riverdb.yaml`. See `riverdb::config::load_config`.
pub fn init_settings() -> Result<&'static Settings> {
    load_config("riverdb.yaml")
}

pub fn init_runtime() -> io::Result<Runtime> {
    Builder::new_multi_thread().enable_all().build()
}

/// Connects to every configured backend (main first, then each secondary in order),
/// drives each through authentication and startup, and assembles the routing session
/// that will serve one client. There's no listener here — accepting client connections
/// and handing them a session is left to whatever embeds this crate.
pub async fn connect_session(conf: &'static Settings) -> Result<XRouterSession> {
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

    info!(backends = backends.len(), "all backends ready, starting routing session");
    XRouterSession::new(backends, xrouter)
}

pub fn run_clock_updater(tokio: &Runtime) {
    tokio.spawn(coarse_monotonic_clock_updater());
}
