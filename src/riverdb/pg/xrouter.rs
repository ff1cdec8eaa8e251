use std::collections::VecDeque;

use bytes::BytesMut;
use nanorand::{Rng, WyRand};
use strum::Display;
use tracing::warn;

use crate::riverdb::Result;
use crate::riverdb::common::{ErrorSeverity, fast_modulo32};
use crate::riverdb::config::XRouterConfig;
use crate::riverdb::pg::backend::{BackendConn, BackendEvent};
use crate::riverdb::pg::classify::{CommandClassifier, QueryClassifier};
use crate::riverdb::pg::protocol::{MessageBuilder, Messages, Tag};
use crate::riverdb::pg::reply::{Reply, ReplyState};
use crate::riverdb::pg::router::UpstreamRouter;

/// State of a per-client routing session (§4.4). `backends[0]` is always *main*; `solo`
/// is a uniformly chosen index (possibly also main) used for single-node traffic.
#[derive(Display, Debug, Copy, Clone, Eq, PartialEq)]
pub enum XRouterState {
    Init,
    Idle,
    Solo,
    WaitSolo,
    LoadData,
    LockMain,
    Main,
    WaitMain,
    WaitSecondary,
    UnlockMain,
}

/// What the router wants done with a backend's reply once it arrives: forwarded to the
/// client verbatim, or consumed silently because the router issued the command itself
/// (the four SQL templates, lock/unlock, and the multi-node replay to secondaries).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Expectation {
    Expect,
    Ignore,
}

/// Per-client multi-node routing session (C4). Owns every backend for the lifetime of
/// the session — there is no cross-session pooling (§5) — and classifies each client
/// command to decide whether it's routed to a single backend (*solo*) or serialized
/// across the whole cluster under a lock on *main*.
pub struct XRouterSession<C: CommandClassifier = QueryClassifier> {
    backends: Vec<BackendConn>,
    solo: usize,
    state: XRouterState,
    expectations: Vec<VecDeque<Expectation>>,
    fenced: Vec<bool>,
    queue: VecDeque<Messages>,
    packets: Vec<Messages>,
    response: BytesMut,
    classifier: C,
    main_sql: String,
    secondary_sql: String,
    lock_sql: String,
    unlock_sql: String,
    init_pending: usize,
    secondaries_pending: usize,
    killed: bool,
    /// Replies the session has decided are client-visible, in delivery order. Stands in
    /// for the client-facing connection, which is outside this crate's scope.
    pub client_outbox: VecDeque<Messages>,
}

const MAIN: usize = 0;

impl XRouterSession<QueryClassifier> {
    /// Builds a session from already-connected, already-authenticated backends and the
    /// cluster's SQL templates, using the default query classifier.
    pub fn new(backends: Vec<BackendConn>, conf: &XRouterConfig) -> Result<Self> {
        Self::with_classifier(backends, conf, QueryClassifier::new())
    }
}

impl<C: CommandClassifier> XRouterSession<C> {
    pub fn with_classifier(backends: Vec<BackendConn>, conf: &XRouterConfig, classifier: C) -> Result<Self> {
        assert!(!backends.is_empty(), "a routing session needs at least one backend");
        let n = backends.len();
        let solo = if n == 1 {
            0
        } else {
            fast_modulo32(WyRand::new().generate(), n as u32) as usize
        };
        let mut session = XRouterSession {
            backends,
            solo,
            state: XRouterState::Init,
            expectations: (0..n).map(|_| VecDeque::new()).collect(),
            fenced: vec![false; n],
            queue: VecDeque::new(),
            packets: Vec::new(),
            response: BytesMut::new(),
            classifier,
            main_sql: conf.main_sql.clone(),
            secondary_sql: conf.secondary_sql.clone(),
            lock_sql: conf.lock_sql.clone(),
            unlock_sql: conf.unlock_sql.clone(),
            init_pending: n,
            secondaries_pending: 0,
            killed: false,
            client_outbox: VecDeque::new(),
        };
        let main_sql = session.main_sql.clone();
        session.send(MAIN, &main_sql, Expectation::Ignore)?;
        let secondary_sql = session.secondary_sql.clone();
        for i in 0..n {
            if i != MAIN {
                session.send(i, &secondary_sql, Expectation::Ignore)?;
            }
        }
        Ok(session)
    }

    pub fn state(&self) -> XRouterState {
        self.state
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Suspends until the backend at `route` has data to read. An event loop calls this
    /// (or its own equivalent readiness notification) before each `poll_backend`.
    pub async fn wait_readable(&self, route: usize) -> Result<()> {
        self.backends[route].wait_readable().await
    }

    fn backend_in_use(&self, route: usize) -> bool {
        !self.fenced[route] && self.backends[route].state() != crate::riverdb::pg::BackendConnState::Failed
    }

    fn send(&mut self, route: usize, sql: &str, expectation: Expectation) -> Result<()> {
        self.backends[route].write(build_query(sql), true)?;
        self.expectations[route].push_back(expectation);
        Ok(())
    }

    /// Drives one round of I/O for the backend at `route`: reads whatever is available
    /// and dispatches the resulting events through the upstream-router upcalls. This is
    /// what an external event loop calls on socket readiness.
    pub fn poll_backend(&mut self, route: usize) -> Result<()> {
        let events = self.backends[route].read_ready()?;
        for event in events {
            match event {
                BackendEvent::Reply(packet, reply) => {
                    if !self.client_reply(route, packet, &reply) {
                        self.kill();
                    }
                }
                BackendEvent::Failed(severity, message) => {
                    let endpoint = format!("backend[{}]", route);
                    self.handle_error(route, severity, &message, &endpoint, &Reply::new());
                }
            }
        }
        Ok(())
    }

    /// Entry point for a client command. Routes it immediately if the session is Idle
    /// (or mid-solo-traffic); otherwise queues it per the Lock/Wait queue policy (§4.4).
    pub fn handle_client_command(&mut self, msgs: Messages) -> Result<()> {
        match self.state {
            XRouterState::Idle => self.route_from_idle(msgs),
            XRouterState::Solo => self.route_to_solo(msgs),
            XRouterState::LoadData => {
                self.backends[self.solo].write(msgs, false)
            }
            _ => {
                self.queue.push_back(msgs);
                Ok(())
            }
        }
    }

    fn route_from_idle(&mut self, msgs: Messages) -> Result<()> {
        if !self.backend_in_use(MAIN) || !self.backend_in_use(self.solo) {
            self.kill();
            return Ok(());
        }
        let is_multi_node = {
            let msg = msgs.first().expect("non-empty Messages");
            self.classifier.is_multi_node(&msg)
        };
        if is_multi_node {
            self.queue.push_back(msgs);
            let lock_sql = self.lock_sql.clone();
            self.send(MAIN, &lock_sql, Expectation::Ignore)?;
            self.state = XRouterState::LockMain;
            Ok(())
        } else {
            self.route_to_solo(msgs)
        }
    }

    fn route_to_solo(&mut self, msgs: Messages) -> Result<()> {
        let will_respond = {
            let msg = msgs.first().expect("non-empty Messages");
            self.classifier.will_respond(&msg)
        };
        self.backends[self.solo].write(msgs, will_respond)?;
        if will_respond {
            self.expectations[self.solo].push_back(Expectation::Expect);
            self.state = XRouterState::WaitSolo;
        } else {
            self.state = XRouterState::Solo;
        }
        Ok(())
    }

    /// Called once `LockMain` succeeds: the item at the front of the queue is the
    /// multi-node command itself (queued by `route_from_idle`), routed to main alone.
    fn enter_main(&mut self) {
        self.state = XRouterState::Main;
        if let Some(cmd) = self.queue.pop_front() {
            self.packets.push(cmd.clone());
            let will_respond = {
                let msg = cmd.first().expect("non-empty Messages");
                self.classifier.will_respond(&msg)
            };
            if self.backends[MAIN].write(cmd, will_respond).is_ok() && will_respond {
                self.expectations[MAIN].push_back(Expectation::Ignore);
                self.state = XRouterState::WaitMain;
            }
        }
    }

    fn replay_to_secondaries(&mut self) {
        self.state = XRouterState::WaitSecondary;
        let packets = std::mem::take(&mut self.packets);
        let mut pending = 0usize;
        for i in 0..self.backends.len() {
            if i == MAIN || !self.backend_in_use(i) {
                continue;
            }
            for pkt in &packets {
                let will_respond = {
                    let msg = pkt.first().expect("non-empty Messages");
                    self.classifier.will_respond(&msg)
                };
                if self.backends[i].write(pkt.clone(), will_respond).is_ok() && will_respond {
                    self.expectations[i].push_back(Expectation::Ignore);
                    pending += 1;
                }
            }
        }
        self.secondaries_pending = pending;
        if pending == 0 {
            self.finish_multi_node_command();
        }
    }

    fn finish_multi_node_command(&mut self) {
        let response = Messages::new(self.response.split().freeze());
        self.client_outbox.push_back(response);
        let unlock_sql = self.unlock_sql.clone();
        self.state = XRouterState::UnlockMain;
        let _ = self.send(MAIN, &unlock_sql, Expectation::Ignore);
    }

    /// Excludes a backend from future routing: fencing is idempotent (§8 invariant 4),
    /// closes the connection, and would place its target in external maintenance mode
    /// (that registry is outside this crate's scope; logging stands in for it).
    fn fence(&mut self, route: usize) {
        if self.fenced[route] {
            return;
        }
        self.fenced[route] = true;
        self.backends[route].finish_connection();
        warn!(route, "fencing divergent secondary backend");
    }

    fn drain_queue(&mut self) {
        while self.state == XRouterState::Idle {
            match self.queue.pop_front() {
                Some(cmd) => {
                    if self.route_from_idle(cmd).is_err() {
                        self.kill();
                        break;
                    }
                }
                None => break,
            }
        }
    }
}

impl<C: CommandClassifier> UpstreamRouter for XRouterSession<C> {
    fn client_reply(&mut self, route: usize, packet: Messages, reply: &Reply) -> bool {
        let _expectation = self.expectations[route].pop_front();
        match self.state {
            XRouterState::Init => {
                self.init_pending = self.init_pending.saturating_sub(1);
                if self.init_pending == 0 {
                    self.state = XRouterState::Idle;
                    self.drain_queue();
                }
            }
            XRouterState::WaitSolo if route == self.solo => {
                self.client_outbox.push_back(packet);
                self.state = if reply.state == ReplyState::LoadData {
                    XRouterState::LoadData
                } else {
                    XRouterState::Idle
                };
                self.drain_queue();
            }
            XRouterState::LoadData if route == self.solo => {
                self.client_outbox.push_back(packet);
                self.state = XRouterState::Idle;
                self.drain_queue();
            }
            XRouterState::LockMain if route == MAIN => {
                if reply.has_error() {
                    // A failed main surfaces as a session error (§4.4 Fencing).
                    return false;
                }
                self.enter_main();
            }
            XRouterState::WaitMain if route == MAIN => {
                if reply.has_error() {
                    self.packets.clear();
                    self.response.clear();
                    self.response.extend_from_slice(packet.as_slice());
                    self.finish_multi_node_command();
                } else {
                    self.response.extend_from_slice(packet.as_slice());
                    self.replay_to_secondaries();
                }
            }
            XRouterState::WaitSecondary => {
                if reply.has_error() {
                    self.fence(route);
                }
                self.secondaries_pending = self.secondaries_pending.saturating_sub(1);
                if self.secondaries_pending == 0 {
                    self.finish_multi_node_command();
                }
            }
            XRouterState::UnlockMain if route == MAIN => {
                self.state = XRouterState::Idle;
                self.drain_queue();
            }
            _ => {}
        }
        true
    }

    fn handle_error(&mut self, route: usize, severity: ErrorSeverity, message: &str, endpoint: &str, _reply: &Reply) {
        warn!(route, %severity, message, endpoint, "backend connection error");
        if route == MAIN || route == self.solo {
            self.kill();
        } else {
            self.fence(route);
        }
    }

    fn kill(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;
        for b in &mut self.backends {
            b.finish_connection();
        }
    }
}

fn build_query(sql: &str) -> Messages {
    let mut mb = MessageBuilder::new(Tag::QUERY);
    mb.write_str(sql);
    mb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysMultiNode;
    impl CommandClassifier for AlwaysMultiNode {
        fn is_multi_node(&self, _msg: &crate::riverdb::pg::protocol::Message) -> bool {
            true
        }
        fn will_respond(&self, _msg: &crate::riverdb::pg::protocol::Message) -> bool {
            true
        }
    }

    #[test]
    fn build_query_is_a_single_null_terminated_query_message() {
        let msgs = build_query("SELECT 1");
        let msg = msgs.first().unwrap();
        assert_eq!(msg.tag(), Tag::QUERY);
        assert_eq!(msg.body(), b"SELECT 1\0");
    }
}
