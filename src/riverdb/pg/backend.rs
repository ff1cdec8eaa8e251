use std::time::Duration;

use bytes::{BytesMut, Buf, BufMut};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::riverdb::{Error, Result};
use crate::riverdb::common::{ErrorSeverity, bytes_to_slice_mut};
use crate::riverdb::config::{Postgres, TlsMode};
use crate::riverdb::server::ClientTransport;
use crate::riverdb::pg::backend_state::BackendConnState;
use crate::riverdb::pg::reply::{Reply, ReplyState};
use crate::riverdb::pg::tracked_query::{TrackedQuery, TrackedQueryQueue};
use crate::riverdb::pg::protocol::{
    format_fields, AuthType, MessageBuilder, MessageParser, Messages, ServerParams, Tag,
    PROTOCOL_VERSION, SSL_ALLOWED, SSL_NOT_ALLOWED, SSL_REQUEST_CODE,
};

/// Something a completed read on a backend connection produced, for the owning routing
/// session to act on. Mirrors the three upstream-router upcalls (see router.rs) as owned
/// values instead of callbacks, so a session can read from several backends without
/// fighting the borrow checker over re-entrant calls into itself.
pub enum BackendEvent {
    /// One command's reply reached Done. `packet` is the exact bytes the server sent for
    /// it (tag bytes included), `reply` a snapshot of the finished accumulator.
    Reply(Messages, Reply),
    /// The connection failed and is now in `Failed`. Permanent failures are never retried
    /// by the caller; Transient ones may be.
    Failed(ErrorSeverity, String),
}

/// One upstream (proxy → PostgreSQL) connection, driven through SSL negotiation,
/// authentication, and startup before settling into steady-state `Routing`.
///
/// A `BackendConn` never reaches into its owner: it reads bytes, updates its own state
/// and `Reply` accumulator, and returns [`BackendEvent`]s describing what happened. It
/// holds no reference back to the session or router that owns it (see `router.rs`'s
/// doc comment for why), which is also why it's safe for the owner to hold a `Vec` of
/// these behind a plain index rather than something heavier.
pub struct BackendConn {
    transport: ClientTransport,
    state: BackendConnState,
    parser: MessageParser,
    backlog: Vec<(Messages, bool)>,
    current: Reply,
    batch: BytesMut,
    tracked: TrackedQueryQueue,
    server_params: ServerParams,
    process_id: u32,
    secret_key: u32,
    app_name: String,
    database: String,
    user: String,
    tls_mode: TlsMode,
}

impl BackendConn {
    pub fn new(stream: TcpStream, conf: &Postgres, app_name: String) -> Self {
        let is_localhost = conf.host == "localhost" || conf.host == "127.0.0.1" || conf.host == "::1";
        BackendConn {
            transport: ClientTransport::new(stream, is_localhost),
            state: BackendConnState::Init,
            parser: MessageParser::new(),
            backlog: Vec::new(),
            current: Reply::new(),
            batch: BytesMut::new(),
            tracked: TrackedQueryQueue::new(),
            server_params: ServerParams::default(),
            process_id: 0,
            secret_key: 0,
            app_name,
            database: conf.database.clone(),
            user: conf.user.clone(),
            tls_mode: conf.backend_tls,
        }
    }

    pub async fn connect(conf: &Postgres, app_name: &str, connect_timeout: Duration) -> Result<Self> {
        let stream = timeout(connect_timeout, TcpStream::connect(conf.addr()))
            .await
            .map_err(|_| Error::transport(format!("timed out connecting to {}", conf.addr())))??;
        Ok(Self::new(stream, conf, app_name.to_string()))
    }

    pub fn state(&self) -> BackendConnState {
        self.state
    }

    /// Suspends until the socket is readable. One of the suspension points §5 names;
    /// an owner drives `read_ready` from here in a loop for the lifetime of the session.
    pub async fn wait_readable(&self) -> Result<()> {
        self.transport.readable().await
    }

    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    pub fn secret_key(&self) -> u32 {
        self.secret_key
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    /// Sends either SSLRequest or the plaintext StartupMessage, per the configured TLS
    /// preference, and enters the matching next state.
    pub fn start(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, BackendConnState::Init);
        if matches!(self.tls_mode, TlsMode::Prefer | TlsMode::Required) && self.transport.can_use_tls() {
            let mut mb = MessageBuilder::new(Tag::UNTAGGED);
            mb.write_i32(SSL_REQUEST_CODE);
            self.raw_write(mb.finish())?;
            self.state = BackendConnState::SslRequest;
        } else {
            self.send_startup_message()?;
            self.state = BackendConnState::Auth;
        }
        Ok(())
    }

    fn send_startup_message(&mut self) -> Result<()> {
        let mut mb = MessageBuilder::new(Tag::UNTAGGED);
        mb.write_i32(PROTOCOL_VERSION);
        mb.write_str("user");
        mb.write_str(&self.user);
        mb.write_str("database");
        mb.write_str(&self.database);
        mb.write_str("application_name");
        mb.write_str(&self.app_name);
        mb.write_byte(0);
        self.raw_write(mb.finish())
    }

    /// Queues or sends a client-originated command. While the connection isn't yet
    /// `Routing`, the write is withheld in the backlog (§4.2); once `Routing` is reached
    /// the whole backlog is flushed in order. `will_respond` seeds the reply tracker.
    pub fn write(&mut self, msgs: Messages, will_respond: bool) -> Result<()> {
        if self.state != BackendConnState::Routing {
            self.backlog.push((msgs, will_respond));
            return Ok(());
        }
        self.write_tracked(msgs, will_respond)
    }

    fn write_tracked(&mut self, msgs: Messages, will_respond: bool) -> Result<()> {
        if will_respond {
            let tag = msgs.first().map(|m| tag_name(m.tag())).unwrap_or("");
            let bytes_in = msgs.len();
            if self.current.is_done() || self.current.state == ReplyState::Start {
                self.current.reset();
                self.current.command = tag;
                self.current.bytes_in = bytes_in;
            } else {
                self.tracked.push(TrackedQuery::new(tag, bytes_in));
            }
        }
        self.raw_write(msgs)
    }

    fn raw_write(&mut self, msgs: Messages) -> Result<()> {
        let bytes = msgs.into_bytes();
        let mut off = 0usize;
        while off < bytes.len() {
            match self.transport.try_write(&bytes[off..]) {
                Ok(0) => break,
                Ok(n) => off += n,
                Err(e) => {
                    self.fail_transient(format!("write error: {}", e));
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Flushes any writes withheld in the backlog while not yet `Routing`. Called once on
    /// entering `Routing`; a backlogged write that itself moves the state away from
    /// `Routing` leaves the remainder queued for the next flush.
    fn flush_backlog(&mut self) -> Result<()> {
        while self.state == BackendConnState::Routing && !self.backlog.is_empty() {
            let (msgs, will_respond) = self.backlog.remove(0);
            self.write_tracked(msgs, will_respond)?;
        }
        Ok(())
    }

    /// Sends a Terminate message. The connection is never reused across sessions
    /// (`can_reuse` is always false), so this is always the last write on a connection.
    pub fn finish_connection(&mut self) {
        let mut mb = MessageBuilder::new(Tag::TERMINATE);
        let msgs = mb.finish();
        let _ = self.raw_write(msgs);
    }

    /// Always false: backends are exclusively owned by one session for their in-use
    /// lifetime and are never pooled across sessions.
    pub fn can_reuse(&self) -> bool {
        false
    }

    fn fail_permanent(&mut self, msg: impl Into<String>) -> BackendEvent {
        self.state = BackendConnState::Failed;
        let msg = msg.into();
        warn!(state = %self.state, "backend connection failed permanently: {}", msg);
        BackendEvent::Failed(ErrorSeverity::Permanent, msg)
    }

    fn fail_transient(&mut self, msg: impl Into<String>) -> BackendEvent {
        self.state = BackendConnState::Failed;
        let msg = msg.into();
        warn!(state = %self.state, "backend connection failed transiently: {}", msg);
        BackendEvent::Failed(ErrorSeverity::Transient, msg)
    }

    /// Verifies a fixed-size sub-field (BackendKeyData's 8 bytes, Authentication's 4-byte
    /// sub-code) actually fits in `len` bytes before it's read, failing the connection
    /// permanently with a descriptive message instead of under-reading or panicking on a
    /// truncated payload.
    fn check_size(&mut self, len: usize, expected: usize, what: &str) -> Option<BackendEvent> {
        if len < expected {
            Some(self.fail_permanent(format!(
                "{} payload too short: expected at least {} bytes, got {}",
                what, expected, len
            )))
        } else {
            None
        }
    }

    /// Reads whatever is currently available on the socket and advances the FSM. In
    /// `Routing`, every complete message drives the current `Reply`; each time it reaches
    /// `Done` a [`BackendEvent::Reply`] is emitted and tracking moves to the next queued
    /// command. Partial trailing bytes are left buffered for the next call.
    pub fn read_ready(&mut self) -> Result<Vec<BackendEvent>> {
        let mut events = Vec::new();
        self.parser.bytes_mut().reserve(4096);
        let n = {
            // Safety: try_read only ever writes into the uninitialized spare capacity
            // returned by chunk_mut, and we advance the buffer's initialized length by
            // exactly the number of bytes it reported writing.
            let buf = unsafe { bytes_to_slice_mut(self.parser.bytes_mut()) };
            match self.transport.try_read(buf) {
                Ok(n) => n,
                Err(e) => {
                    events.push(self.fail_transient(format!("read error: {}", e)));
                    return Ok(events);
                }
            }
        };
        if n == 0 {
            events.push(self.fail_transient("connection closed by peer"));
            return Ok(events);
        }
        unsafe {
            self.parser.bytes_mut().advance_mut(n);
        }
        self.drain_parsed(&mut events)?;
        Ok(events)
    }

    /// Drives the connection from `Init` through authentication and startup until it
    /// reaches `Routing`, suspending on socket readiness at each step (§5). Plaintext
    /// only: a backend that negotiates TLS lands in `SslHandshake`, which this helper
    /// doesn't drive, since completing a rustls handshake needs a `ClientConfig` that's
    /// the caller's concern, not the connection FSM's.
    pub async fn handshake(&mut self) -> Result<()> {
        self.start()?;
        loop {
            match self.state {
                BackendConnState::Routing => return Ok(()),
                BackendConnState::Failed => {
                    return Err(Error::transport("backend connection failed during handshake"));
                }
                BackendConnState::SslHandshake => {
                    return Err(Error::transport(
                        "backend requested TLS; caller must drive the handshake before calling handshake()",
                    ));
                }
                _ => {
                    self.transport.readable().await?;
                    for event in self.read_ready()? {
                        if let BackendEvent::Failed(_, msg) = event {
                            return Err(Error::transport(msg));
                        }
                    }
                }
            }
        }
    }

    fn drain_parsed(&mut self, events: &mut Vec<BackendEvent>) -> Result<()> {
        match self.state {
            BackendConnState::SslRequest => self.drain_ssl_reply(events),
            BackendConnState::Auth => self.drain_auth(events),
            BackendConnState::Startup => self.drain_startup(events),
            BackendConnState::Routing => self.drain_routing(events),
            _ => Ok(()),
        }
    }

    fn drain_ssl_reply(&mut self, events: &mut Vec<BackendEvent>) -> Result<()> {
        let buf = self.parser.bytes_mut();
        if buf.is_empty() {
            return Ok(());
        }
        let b = buf[0];
        buf.advance(1);
        match b {
            SSL_ALLOWED => {
                self.state = BackendConnState::SslHandshake;
                info!("backend accepted SSLRequest, beginning TLS handshake");
            }
            SSL_NOT_ALLOWED => {
                self.send_startup_message()?;
                self.state = BackendConnState::Auth;
            }
            other => {
                events.push(self.fail_permanent(format!("unexpected SSLRequest reply byte {}", other)));
            }
        }
        Ok(())
    }

    fn drain_auth(&mut self, events: &mut Vec<BackendEvent>) -> Result<()> {
        while let Some(result) = self.parser.next() {
            let msgs = result?;
            let msg = msgs.first().expect("non-empty Messages");
            if !self.state.msg_is_allowed(msg.tag()) {
                events.push(self.fail_permanent(format!("unexpected message {} during authentication", msg.tag())));
                return Ok(());
            }
            match msg.tag() {
                Tag::AUTHENTICATION => {
                    if let Some(event) = self.check_size(msg.body().len(), 4, "Authentication") {
                        events.push(event);
                        return Ok(());
                    }
                    let mut r = msg.reader();
                    let sub_code = AuthType::from(r.read_i32());
                    if r.has_error() {
                        events.push(self.fail_permanent("truncated Authentication sub-code"));
                        return Ok(());
                    }
                    if sub_code == AuthType::Ok {
                        self.state = BackendConnState::Startup;
                        // Anything left buffered (BackendKeyData, ParameterStatus, ReadyForQuery,
                        // ...) belongs to Startup, not Auth; hand the rest of this read off to
                        // the right handler instead of misreading it here.
                        return self.drain_startup(events);
                    } else {
                        events.push(self.fail_permanent(format!("unsupported authentication method {}", sub_code)));
                        return Ok(());
                    }
                }
                Tag::ERROR_RESPONSE => {
                    events.push(self.fail_permanent(format_fields(&msg)));
                    return Ok(());
                }
                _ => unreachable!("msg_is_allowed already filtered this tag"),
            }
        }
        Ok(())
    }

    fn drain_startup(&mut self, events: &mut Vec<BackendEvent>) -> Result<()> {
        while let Some(result) = self.parser.next() {
            let msgs = result?;
            let msg = msgs.first().expect("non-empty Messages");
            if !self.state.msg_is_allowed(msg.tag()) {
                events.push(self.fail_permanent(format!("unexpected message {} during Startup", msg.tag())));
                return Ok(());
            }
            match msg.tag() {
                Tag::BACKEND_KEY_DATA => {
                    let body = msg.body();
                    if let Some(event) = self.check_size(body.len(), 8, "BackendKeyData") {
                        events.push(event);
                        return Ok(());
                    }
                    self.process_id = u32::from_be_bytes(body[0..4].try_into().unwrap());
                    self.secret_key = u32::from_be_bytes(body[4..8].try_into().unwrap());
                }
                Tag::PARAMETER_STATUS => {
                    self.server_params = ServerParams::new(std::iter::once(msg));
                }
                Tag::NOTICE_RESPONSE => {
                    debug!(fields = %format_fields(&msg), "notice during backend startup");
                }
                Tag::ERROR_RESPONSE => {
                    events.push(self.fail_permanent(format_fields(&msg)));
                    return Ok(());
                }
                Tag::READY_FOR_QUERY => {
                    self.state = BackendConnState::Routing;
                    self.current.reset();
                    self.flush_backlog()?;
                    return Ok(());
                }
                _ => unreachable!("msg_is_allowed already filtered this tag"),
            }
        }
        Ok(())
    }

    fn drain_routing(&mut self, events: &mut Vec<BackendEvent>) -> Result<()> {
        loop {
            let msgs = match self.parser.next() {
                Some(Ok(msgs)) => msgs,
                Some(Err(e)) => {
                    events.push(self.fail_permanent(format!("protocol error: {}", e)));
                    return Ok(());
                }
                None => break,
            };
            let msg = msgs.first().expect("non-empty Messages");
            self.current.process_message(&msg);
            // Carried on `self` rather than a local: a reply that straddles two
            // read_ready calls (e.g. RowDescription now, the rest of the result set
            // later) must not lose the bytes seen in the earlier call.
            self.batch.extend_from_slice(msgs.as_slice());

            if self.current.is_done() {
                let packet = Messages::new(std::mem::take(&mut self.batch).freeze());
                let reply = self.current.clone();
                events.push(BackendEvent::Reply(packet, reply));
                self.current = Reply::new();
                // The next tracked command (if any) becomes current; seed its tag and
                // outbound byte count so the reply it accumulates carries them too.
                if let Some(next) = self.tracked.pop() {
                    self.current.command = next.tag;
                    self.current.bytes_in = next.buf_len;
                }
            }
        }
        Ok(())
    }
}

fn tag_name(tag: Tag) -> &'static str {
    if tag == Tag::QUERY { "Query" } else { "" }
}
