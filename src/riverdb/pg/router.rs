use crate::riverdb::common::ErrorSeverity;
use crate::riverdb::pg::protocol::Messages;
use crate::riverdb::pg::reply::Reply;

/// The collaborator a [`BackendConn`](crate::riverdb::pg::backend::BackendConn) reports
/// into. A backend connection has no opinion about routing; it hands complete replies and
/// failures up to whatever owns it (in this crate, always an
/// [`XRouterSession`](crate::riverdb::pg::xrouter::XRouterSession)) and lets that decide
/// what happens next.
pub trait UpstreamRouter {
    /// A batch of complete backend messages arrived on the connection identified by
    /// `route`, with `reply` the accumulator snapshot as of the last message in the batch.
    /// Returns false to request that the session owning this backend be torn down.
    fn client_reply(&mut self, route: usize, packet: Messages, reply: &Reply) -> bool;

    /// The connection identified by `route` failed. `endpoint` identifies the backend
    /// (typically "host:port") for logging; `severity` says whether the owner may retry
    /// this backend or must give up on it.
    fn handle_error(&mut self, route: usize, severity: ErrorSeverity, message: &str, endpoint: &str, reply: &Reply);

    /// Terminate the whole session: every backend owned by it must be closed.
    fn kill(&mut self);
}
