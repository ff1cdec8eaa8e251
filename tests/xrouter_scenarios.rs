//! Exercises the routing session against real loopback TCP connections, with each
//! "backend" a hand-scripted task that speaks just enough of the wire protocol to drive
//! the session through a scenario: a single-node query, a multi-node DDL statement that
//! succeeds everywhere, one where a secondary diverges, and a reply split across reads.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use riverdb::config::{Postgres, TlsMode, XRouterConfig};
use riverdb::pg::protocol::{MessageBuilder, Messages, Tag, SSL_ALLOWED};
use riverdb::pg::{BackendConn, BackendConnState, BackendEvent, XRouterSession, XRouterState};

// --- raw wire encoding, independent of the crate's own MessageBuilder ---

fn authentication_ok() -> Vec<u8> {
    let mut buf = vec![b'R'];
    buf.extend_from_slice(&8u32.to_be_bytes());
    buf.extend_from_slice(&0i32.to_be_bytes());
    buf
}

fn backend_key_data() -> Vec<u8> {
    let mut buf = vec![b'K'];
    buf.extend_from_slice(&12u32.to_be_bytes());
    buf.extend_from_slice(&4242u32.to_be_bytes());
    buf.extend_from_slice(&9999u32.to_be_bytes());
    buf
}

fn ready_for_query() -> Vec<u8> {
    vec![b'Z', 0, 0, 0, 5, b'I']
}

fn row_description(field_count: u16) -> Vec<u8> {
    let mut buf = vec![b'T'];
    buf.extend_from_slice(&6u32.to_be_bytes());
    buf.extend_from_slice(&field_count.to_be_bytes());
    buf
}

fn data_row() -> Vec<u8> {
    let mut buf = vec![b'D'];
    buf.extend_from_slice(&4u32.to_be_bytes());
    buf
}

fn command_complete(tag: &str) -> Vec<u8> {
    let mut buf = vec![b'C'];
    let len = 4 + tag.len() as u32 + 1;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(tag.as_bytes());
    buf.push(0);
    buf
}

fn error_response(sqlstate: &str, message: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.push(b'C');
    payload.extend_from_slice(sqlstate.as_bytes());
    payload.push(0);
    payload.push(b'M');
    payload.extend_from_slice(message.as_bytes());
    payload.push(0);
    payload.push(0);
    let mut buf = vec![b'E'];
    buf.extend_from_slice(&(4 + payload.len() as u32).to_be_bytes());
    buf.extend(payload);
    buf
}

fn handshake_bytes() -> Vec<u8> {
    let mut buf = authentication_ok();
    buf.extend(backend_key_data());
    buf.extend(ready_for_query());
    buf
}

fn ack() -> Vec<u8> {
    let mut buf = command_complete("SELECT 1");
    buf.extend(ready_for_query());
    buf
}

fn one_row_reply() -> Vec<u8> {
    let mut buf = row_description(1);
    buf.extend(data_row());
    buf.extend(command_complete("SELECT 1"));
    buf.extend(ready_for_query());
    buf
}

fn error_reply(sqlstate: &str, message: &str) -> Vec<u8> {
    let mut buf = error_response(sqlstate, message);
    buf.extend(ready_for_query());
    buf
}

fn select_query(sql: &str) -> Messages {
    let mut mb = MessageBuilder::new(Tag::QUERY);
    mb.write_str(sql);
    mb.finish()
}

/// Accepts one connection, writes the handshake immediately, then for each scripted
/// response: drains whatever the client has written so far and writes the response back.
/// Good enough here because every client write in these scenarios is one small message,
/// reliably delivered in a single read on loopback.
async fn fake_backend(listener: TcpListener, responses: Vec<Vec<u8>>) {
    let (mut stream, _) = listener.accept().await.expect("accept failed");
    stream.write_all(&handshake_bytes()).await.expect("handshake write failed");
    let mut buf = [0u8; 4096];
    for response in responses {
        stream.read(&mut buf).await.expect("read failed");
        stream.write_all(&response).await.expect("response write failed");
    }
}

async fn ephemeral_listener() -> (TcpListener, Postgres) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let port = listener.local_addr().unwrap().port();
    let conf = Postgres {
        host: "127.0.0.1".to_string(),
        port,
        database: "db".to_string(),
        user: "user".to_string(),
        password: String::new(),
        backend_tls: TlsMode::Disabled,
    };
    (listener, conf)
}

async fn connected_backend(conf: &Postgres) -> BackendConn {
    let mut backend = BackendConn::connect(conf, "xrouter-test", Duration::from_secs(1))
        .await
        .expect("connect failed");
    backend.handshake().await.expect("handshake failed");
    backend
}

fn xrouter_config(main: Postgres, secondaries: Vec<Postgres>) -> XRouterConfig {
    XRouterConfig {
        main: main.clone(),
        secondaries,
        default: main,
        main_sql: "SELECT 1".to_string(),
        secondary_sql: "SELECT 1".to_string(),
        lock_sql: "SELECT pg_advisory_lock(1)".to_string(),
        unlock_sql: "SELECT pg_advisory_unlock(1)".to_string(),
        connect_timeout_ms: 1000,
    }
}

/// Polls whichever backend becomes readable first and feeds it through the session,
/// looping until `until` is satisfied or the deadline passes.
async fn drive_until(session: &mut XRouterSession, routes: usize, until: impl Fn(&XRouterSession) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !until(session) {
            let mut ready = None;
            for route in 0..routes {
                if tokio::time::timeout(Duration::from_millis(20), session.wait_readable(route))
                    .await
                    .is_ok()
                {
                    ready = Some(route);
                    break;
                }
            }
            let route = ready.expect("no backend became readable");
            session.poll_backend(route).expect("poll_backend failed");
        }
    })
    .await
    .expect("session never reached the expected state");
}

#[tokio::test]
async fn single_backend_routes_a_select_and_returns_its_rows() {
    let (listener, conf) = ephemeral_listener().await;
    let server = tokio::spawn(fake_backend(listener, vec![ack(), one_row_reply()]));

    let backend = connected_backend(&conf).await;
    let xconf = xrouter_config(conf, Vec::new());
    let mut session = XRouterSession::new(vec![backend], &xconf).expect("session construction failed");

    drive_until(&mut session, 1, |s| s.state() == XRouterState::Idle).await;

    session
        .handle_client_command(select_query("SELECT * FROM widgets"))
        .expect("routing the query failed");
    drive_until(&mut session, 1, |s| s.state() == XRouterState::Idle).await;

    assert_eq!(session.client_outbox.len(), 1);
    let reply = session.client_outbox.pop_front().unwrap();
    let tags: Vec<Tag> = reply.iter(0).map(|m| m.tag()).collect();
    assert_eq!(
        tags,
        vec![Tag::ROW_DESCRIPTION, Tag::DATA_ROW, Tag::COMMAND_COMPLETE, Tag::READY_FOR_QUERY]
    );
    assert!(!session.is_killed());

    server.await.expect("fake backend task panicked");
}

#[tokio::test]
async fn multi_node_statement_locks_main_runs_it_then_replays_to_every_secondary() {
    let (main_listener, main_conf) = ephemeral_listener().await;
    let (sec1_listener, sec1_conf) = ephemeral_listener().await;
    let (sec2_listener, sec2_conf) = ephemeral_listener().await;

    let main_server = tokio::spawn(fake_backend(main_listener, vec![ack(), ack(), ack(), ack()]));
    let sec1_server = tokio::spawn(fake_backend(sec1_listener, vec![ack(), ack()]));
    let sec2_server = tokio::spawn(fake_backend(sec2_listener, vec![ack(), ack()]));

    let main_backend = connected_backend(&main_conf).await;
    let sec1_backend = connected_backend(&sec1_conf).await;
    let sec2_backend = connected_backend(&sec2_conf).await;
    let xconf = xrouter_config(main_conf, vec![sec1_conf, sec2_conf]);
    let mut session = XRouterSession::new(vec![main_backend, sec1_backend, sec2_backend], &xconf)
        .expect("session construction failed");

    drive_until(&mut session, 3, |s| s.state() == XRouterState::Idle).await;

    session
        .handle_client_command(select_query("CREATE TABLE widgets (id int)"))
        .expect("routing the statement failed");
    drive_until(&mut session, 3, |s| s.state() == XRouterState::Idle).await;

    assert_eq!(session.client_outbox.len(), 1);
    let reply = session.client_outbox.pop_front().unwrap();
    let tags: Vec<Tag> = reply.iter(0).map(|m| m.tag()).collect();
    assert_eq!(tags, vec![Tag::COMMAND_COMPLETE, Tag::READY_FOR_QUERY]);
    assert!(!session.is_killed());

    main_server.await.expect("main fake backend task panicked");
    sec1_server.await.expect("secondary 1 fake backend task panicked");
    sec2_server.await.expect("secondary 2 fake backend task panicked");
}

#[tokio::test]
async fn a_secondary_erroring_during_replay_is_fenced_without_losing_mains_reply() {
    let (main_listener, main_conf) = ephemeral_listener().await;
    let (sec1_listener, sec1_conf) = ephemeral_listener().await;
    let (sec2_listener, sec2_conf) = ephemeral_listener().await;

    let main_server = tokio::spawn(fake_backend(main_listener, vec![ack(), ack(), ack(), ack()]));
    let sec1_server = tokio::spawn(fake_backend(sec1_listener, vec![ack(), ack()]));
    let sec2_server = tokio::spawn(fake_backend(
        sec2_listener,
        vec![ack(), error_reply("42601", "relation already exists")],
    ));

    let main_backend = connected_backend(&main_conf).await;
    let sec1_backend = connected_backend(&sec1_conf).await;
    let sec2_backend = connected_backend(&sec2_conf).await;
    let xconf = xrouter_config(main_conf, vec![sec1_conf, sec2_conf]);
    let mut session = XRouterSession::new(vec![main_backend, sec1_backend, sec2_backend], &xconf)
        .expect("session construction failed");

    drive_until(&mut session, 3, |s| s.state() == XRouterState::Idle).await;

    session
        .handle_client_command(select_query("CREATE TABLE widgets (id int)"))
        .expect("routing the statement failed");
    drive_until(&mut session, 3, |s| s.state() == XRouterState::Idle).await;

    // Main's own success is still delivered to the client even though a secondary
    // diverged; the fenced secondary never surfaces an error to the client directly.
    assert_eq!(session.client_outbox.len(), 1);
    let reply = session.client_outbox.pop_front().unwrap();
    let tags: Vec<Tag> = reply.iter(0).map(|m| m.tag()).collect();
    assert_eq!(tags, vec![Tag::COMMAND_COMPLETE, Tag::READY_FOR_QUERY]);
    assert!(!session.is_killed());

    main_server.await.expect("main fake backend task panicked");
    sec1_server.await.expect("secondary 1 fake backend task panicked");
    sec2_server.await.expect("secondary 2 fake backend task panicked");
}

#[tokio::test]
async fn a_reply_split_across_two_reads_is_not_seen_until_it_completes() {
    let (listener, conf) = ephemeral_listener().await;
    let reply = one_row_reply();
    // Splits after a complete RowDescription message but partway through DataRow's
    // 5-byte header, so the parser has one full message plus an unreadable fragment.
    let split_at = 9;
    let (head, tail) = reply.split_at(split_at);
    let head = head.to_vec();
    let tail = tail.to_vec();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        stream.write_all(&handshake_bytes()).await.expect("handshake write failed");
        let mut buf = [0u8; 4096];
        stream.read(&mut buf).await.expect("read of init query failed");
        stream.write_all(&ack()).await.expect("ack write failed");
        stream.read(&mut buf).await.expect("read of select failed");
        stream.write_all(&head).await.expect("partial write failed");
        tokio::time::sleep(Duration::from_millis(50)).await;
        stream.write_all(&tail).await.expect("remainder write failed");
    });

    let mut backend = connected_backend(&conf).await;
    backend
        .write(select_query("SELECT 1"), true)
        .expect("sending the init query failed");
    loop {
        backend.wait_readable().await.expect("wait_readable failed");
        let events = backend.read_ready().expect("read_ready failed");
        if events.iter().any(|e| matches!(e, BackendEvent::Reply(_, _))) {
            break;
        }
    }

    backend
        .write(select_query("SELECT * FROM widgets"), true)
        .expect("sending the select failed");

    backend.wait_readable().await.expect("wait_readable failed");
    let events = backend.read_ready().expect("read_ready failed");
    assert!(
        events.is_empty(),
        "a partial message must not produce a reply event"
    );

    let events = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            backend.wait_readable().await.expect("wait_readable failed");
            let events = backend.read_ready().expect("read_ready failed");
            if !events.is_empty() {
                return events;
            }
        }
    })
    .await
    .expect("the completed reply never arrived");

    assert_eq!(events.len(), 1);
    match &events[0] {
        BackendEvent::Reply(packet, reply) => {
            assert_eq!(reply.rows, 1);
            assert_eq!(reply.field_count, 1);
            let tags: Vec<Tag> = packet.iter(0).map(|m| m.tag()).collect();
            assert_eq!(
                tags,
                vec![Tag::ROW_DESCRIPTION, Tag::DATA_ROW, Tag::COMMAND_COMPLETE, Tag::READY_FOR_QUERY]
            );
        }
        BackendEvent::Failed(_, msg) => panic!("backend connection failed: {}", msg),
    }

    server.await.expect("fake backend task panicked");
}

#[tokio::test]
async fn ssl_is_negotiated_before_authentication_starts() {
    // `can_use_tls` is keyed off whether the configured host looks like loopback, so a
    // non-loopback hostname is used here even though the stream itself is a loopback
    // connection, to exercise the SSLRequest branch of `start()`.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        let mut buf = [0u8; 16];
        let n = stream.read(&mut buf).await.expect("read of SSLRequest failed");
        assert_eq!(n, 8, "SSLRequest is an 8-byte untagged message");
        stream.write_all(&[SSL_ALLOWED]).await.expect("SSLRequest reply write failed");
    });

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let conf = Postgres {
        host: "postgres.internal".to_string(),
        port: addr.port(),
        database: "db".to_string(),
        user: "user".to_string(),
        password: String::new(),
        backend_tls: TlsMode::Required,
    };
    let mut backend = BackendConn::new(stream, &conf, "xrouter-test".to_string());
    assert_eq!(backend.state(), BackendConnState::Init);

    backend.start().expect("start failed");
    assert_eq!(
        backend.state(),
        BackendConnState::SslRequest,
        "SSLRequest must be sent, and negotiated, before the StartupMessage/authentication"
    );

    backend.wait_readable().await.expect("wait_readable failed");
    backend.read_ready().expect("read_ready failed");
    assert_eq!(
        backend.state(),
        BackendConnState::SslHandshake,
        "an 'S' reply must move the connection into the TLS handshake, still before Routing"
    );

    server.await.expect("fake backend task panicked");
}

#[tokio::test]
async fn backlogged_writes_flush_in_order_and_keep_their_will_respond_flag() {
    let (listener, conf) = ephemeral_listener().await;
    let tracked_query = select_query("SELECT * FROM widgets");
    let tracked_len = tracked_query.len();
    let untracked_query = select_query("UNLOCK");
    let mut expected_bytes = Vec::new();
    expected_bytes.extend_from_slice(tracked_query.as_slice());
    expected_bytes.extend_from_slice(untracked_query.as_slice());

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        stream.write_all(&handshake_bytes()).await.expect("handshake write failed");
        // The StartupMessage and the flushed backlog are two separate writes on the
        // client side, so read in a loop rather than assuming they land in one segment.
        tokio::time::timeout(Duration::from_secs(2), async {
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.expect("read of flushed backlog failed");
                assert!(n > 0, "connection closed before the backlog was flushed");
                received.extend_from_slice(&buf[..n]);
                if received.ends_with(&expected_bytes[..]) {
                    break;
                }
            }
        })
        .await
        .expect("backlogged writes must flush in the order they were queued, will_respond flags intact");
        // Only the tracked (will_respond=true) write gets a reply; the untracked one is
        // left alone, matching how lock_sql/unlock_sql-style writes are actually used.
        stream.write_all(&one_row_reply()).await.expect("reply write failed");
    });

    let mut backend = BackendConn::connect(&conf, "xrouter-test", Duration::from_secs(1))
        .await
        .expect("connect failed");

    // Both writes happen while still `Init`, before the handshake has even started.
    backend
        .write(tracked_query.clone(), true)
        .expect("queuing the tracked write failed");
    backend
        .write(untracked_query.clone(), false)
        .expect("queuing the untracked write failed");
    assert_eq!(backend.state(), BackendConnState::Init);

    backend.handshake().await.expect("handshake failed");
    assert_eq!(backend.state(), BackendConnState::Routing);

    let events = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            backend.wait_readable().await.expect("wait_readable failed");
            let events = backend.read_ready().expect("read_ready failed");
            if !events.is_empty() {
                return events;
            }
        }
    })
    .await
    .expect("the flushed write's reply never arrived");

    assert_eq!(events.len(), 1);
    match &events[0] {
        BackendEvent::Reply(_, reply) => {
            assert_eq!(reply.rows, 1);
            // If a backlogged write's `will_respond` flag were discarded on flush (instead
            // of carried through from `write()`), the untracked write would displace the
            // tracked one as `current`, and `bytes_in` would reflect its length instead.
            assert_eq!(
                reply.bytes_in, tracked_len,
                "current reply must track the tracked write, not the untracked one"
            );
        }
        BackendEvent::Failed(_, msg) => panic!("backend connection failed: {}", msg),
    }

    server.await.expect("fake backend task panicked");
}
