//! End-to-end tests: a real listener on an ephemeral port, real TCP clients.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use cutoff_core::{AdmissionStatus, ApplicantRecord, CutoffRequest};
use cutoff_server::domain::ServerConfig;
use cutoff_server::infrastructure::client::{request_admission, request_cutoff};
use cutoff_server::infrastructure::CutoffServer;

const TEST_DEADLINE: Duration = Duration::from_secs(5);

struct RunningServer {
    addr: SocketAddr,
    running: Arc<AtomicBool>,
    handle: JoinHandle<anyhow::Result<()>>,
}

async fn start_server(config: ServerConfig) -> RunningServer {
    let server = CutoffServer::bind(ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        ..config
    })
    .await
    .unwrap();
    let addr = server.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let handle = tokio::spawn(server.run(Arc::clone(&running)));
    RunningServer {
        addr,
        running,
        handle,
    }
}

fn request(marks: &[(i32, i32, i32)], seats: usize) -> CutoffRequest {
    let records = marks
        .iter()
        .enumerate()
        .map(|(i, &(m, p, c))| ApplicantRecord::new(i + 1, m, p, c).unwrap())
        .collect();
    CutoffRequest::new(records, seats).unwrap()
}

fn fields(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Sends raw bytes and returns whatever the server writes before closing.
async fn send_raw(addr: SocketAddr, bytes: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(bytes).await.unwrap();
    // Half-close so a server waiting for more input sees EOF.
    let _ = stream.shutdown().await;
    let mut reply = Vec::new();
    // A reset instead of a clean close still means "no reply".
    let _ = tokio::time::timeout(TEST_DEADLINE, stream.read_to_end(&mut reply))
        .await
        .expect("server did not close the connection");
    reply
}

#[tokio::test]
async fn test_reference_request_returns_165() {
    // Arrange
    let server = start_server(ServerConfig::default()).await;
    let req = request(&[(90, 80, 70), (100, 100, 100), (50, 40, 30)], 2);

    // Act
    let cutoff = request_cutoff(server.addr, &req).await.unwrap();

    // Assert
    assert_eq!(cutoff, 165.0);
}

#[tokio::test]
async fn test_admission_report_marks_passing_applicants() {
    let server = start_server(ServerConfig::default()).await;
    let req = request(&[(90, 80, 70), (100, 100, 100), (50, 40, 30)], 2);

    let outcome = request_admission(server.addr, &req).await.unwrap();

    assert_eq!(outcome.cutoff, 165.0);
    let ordinals: Vec<usize> = outcome.ranking.iter().map(|r| r.record.ordinal()).collect();
    assert_eq!(ordinals, vec![2, 1, 3]);
    let statuses: Vec<AdmissionStatus> = outcome.ranking.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            AdmissionStatus::Passed,
            AdmissionStatus::Passed,
            AdmissionStatus::NotPassed
        ]
    );
}

#[tokio::test]
async fn test_reply_bytes_are_big_endian_f32() {
    let server = start_server(ServerConfig::default()).await;

    let reply = send_raw(server.addr, &fields(&[3, 90, 80, 70, 100, 100, 100, 50, 40, 30, 2])).await;

    assert_eq!(reply, vec![0x43, 0x25, 0x00, 0x00]);
}

#[tokio::test]
async fn test_tied_totals_give_the_shared_value() {
    // Totals 180, 170, 170, 170 with two seats.
    let server = start_server(ServerConfig::default()).await;
    let req = request(&[(100, 80, 80), (90, 80, 80), (90, 80, 80), (90, 80, 80)], 2);

    let cutoff = request_cutoff(server.addr, &req).await.unwrap();

    assert_eq!(cutoff, 170.0);
}

#[tokio::test]
async fn test_out_of_range_mark_gets_no_reply() {
    let server = start_server(ServerConfig::default()).await;

    // Marks are validated per triple, so the whole bad triple is sent.
    let reply = send_raw(server.addr, &fields(&[1, 101, 0, 0])).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_partial_bad_triple_is_truncated_and_gets_no_reply() {
    let server = start_server(ServerConfig::default()).await;

    let reply = send_raw(server.addr, &fields(&[1, 101])).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_zero_count_gets_no_reply() {
    let server = start_server(ServerConfig::default()).await;

    let reply = send_raw(server.addr, &fields(&[0])).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_seat_count_above_applicants_gets_no_reply() {
    let server = start_server(ServerConfig::default()).await;

    let reply = send_raw(server.addr, &fields(&[1, 50, 50, 50, 2])).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_count_above_configured_maximum_gets_no_reply() {
    let server = start_server(ServerConfig {
        max_applicants: 2,
        ..ServerConfig::default()
    })
    .await;

    let reply = send_raw(server.addr, &fields(&[3])).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_acceptor_survives_a_bad_session() {
    // Arrange: one failing session first.
    let server = start_server(ServerConfig::default()).await;
    let _ = send_raw(server.addr, &fields(&[-5])).await;

    // Act: a valid request afterwards.
    let req = request(&[(60, 60, 60)], 1);
    let cutoff = request_cutoff(server.addr, &req).await.unwrap();

    // Assert
    assert_eq!(cutoff, 120.0);
}

#[tokio::test]
async fn test_concurrent_clients_each_get_their_own_cutoff() {
    let server = start_server(ServerConfig::default()).await;

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let addr = server.addr;
            tokio::spawn(async move {
                // Single applicant with maths = i, so the cutoff is i.
                let req = request(&[(i, 0, 0)], 1);
                (i, request_cutoff(addr, &req).await.unwrap())
            })
        })
        .collect();

    for task in tasks {
        let (i, cutoff) = task.await.unwrap();
        assert_eq!(cutoff, i as f32);
    }
}

#[tokio::test]
async fn test_stalled_client_does_not_block_others() {
    let server = start_server(ServerConfig::default()).await;

    // A client that sends half a request and then goes quiet.
    let mut stalled = TcpStream::connect(server.addr).await.unwrap();
    stalled.write_all(&fields(&[2, 50])).await.unwrap();

    let req = request(&[(70, 70, 70)], 1);
    let cutoff = tokio::time::timeout(TEST_DEADLINE, request_cutoff(server.addr, &req))
        .await
        .expect("request blocked by stalled client")
        .unwrap();

    assert_eq!(cutoff, 140.0);
    drop(stalled);
}

#[tokio::test]
async fn test_session_timeout_disconnects_silent_client() {
    let server = start_server(ServerConfig {
        session_timeout: Some(Duration::from_millis(100)),
        ..ServerConfig::default()
    })
    .await;

    // Connect and send nothing.
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    let mut reply = Vec::new();
    let closed = tokio::time::timeout(TEST_DEADLINE, stream.read_to_end(&mut reply)).await;

    assert!(closed.is_ok(), "server kept the silent session open");
    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_clearing_running_flag_stops_the_accept_loop() {
    let server = start_server(ServerConfig::default()).await;

    server.running.store(false, Ordering::Relaxed);
    let result = tokio::time::timeout(TEST_DEADLINE, server.handle)
        .await
        .expect("accept loop did not stop")
        .unwrap();

    assert!(result.is_ok());
}
