pub mod protocol;
mod sql;
mod reply;
mod tracked_query;
mod classify;
mod router;
mod backend_state;
mod backend;
mod xrouter;

pub use self::sql::{Query, QueryType};
pub use self::reply::{Reply, ReplyState};
pub use self::tracked_query::{TrackedQuery, TrackedQueryQueue};
pub use self::classify::{CommandClassifier, QueryClassifier};
pub use self::router::UpstreamRouter;
pub use self::backend_state::BackendConnState;
pub use self::backend::{BackendConn, BackendEvent};
pub use self::xrouter::{XRouterSession, XRouterState};
