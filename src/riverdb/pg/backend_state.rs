use strum::Display;

use crate::riverdb::pg::protocol::Tag;

/// Lifecycle of a single backend (proxy → Postgres) connection.
///
/// `Init` → (`SslRequest` → `SslHandshake`)? → `Auth` → `Startup` → `Routing` is the happy
/// path; any protocol or auth failure moves straight to `Failed`, which is terminal.
#[derive(Display, Debug, Copy, Clone, Eq, PartialEq)]
pub enum BackendConnState {
    /// Freshly connected; about to send either an SSLRequest or the plaintext StartupMessage.
    Init,
    /// SSLRequest sent, waiting on the single-byte 'S'/'N' reply.
    SslRequest,
    /// 'S' was received; running the TLS handshake before resuming the protocol.
    SslHandshake,
    /// StartupMessage sent, processing Authentication messages until AuthenticationOk.
    Auth,
    /// AuthenticationOk received, collecting BackendKeyData/ParameterStatus until ReadyForQuery.
    Startup,
    /// Steady state: accumulating replies to commands already written.
    Routing,
    /// Terminal: the connection is unusable and must not be written to again.
    Failed,
}

impl BackendConnState {
    /// Whether a message with this tag is valid for the backend to send while in this state.
    pub fn msg_is_allowed(&self, tag: Tag) -> bool {
        match self {
            BackendConnState::Init => false,
            BackendConnState::SslRequest => tag == Tag::UNTAGGED, // raw 'S'/'N' byte, handled specially
            BackendConnState::SslHandshake => false,
            BackendConnState::Auth => tag == Tag::AUTHENTICATION || tag == Tag::ERROR_RESPONSE,
            BackendConnState::Startup => matches!(
                tag,
                Tag::BACKEND_KEY_DATA | Tag::PARAMETER_STATUS | Tag::READY_FOR_QUERY | Tag::ERROR_RESPONSE | Tag::NOTICE_RESPONSE
            ),
            BackendConnState::Routing => true,
            BackendConnState::Failed => false,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BackendConnState::Failed)
    }

    pub fn is_routing(&self) -> bool {
        matches!(self, BackendConnState::Routing)
    }
}

impl Default for BackendConnState {
    fn default() -> Self {
        BackendConnState::Init
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_allows_any_tag() {
        let s = BackendConnState::Routing;
        assert!(s.msg_is_allowed(Tag::DATA_ROW));
        assert!(s.msg_is_allowed(Tag::ERROR_RESPONSE));
    }

    #[test]
    fn init_allows_nothing() {
        assert!(!BackendConnState::Init.msg_is_allowed(Tag::READY_FOR_QUERY));
    }

    #[test]
    fn failed_is_terminal() {
        assert!(BackendConnState::Failed.is_failed());
        assert!(!BackendConnState::Failed.msg_is_allowed(Tag::READY_FOR_QUERY));
    }
}
