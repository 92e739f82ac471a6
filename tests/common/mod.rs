//! Shared doubles for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use proofpay_deployer::blockchain::{
    ChainClient, ChainError, ChainResult, ConfirmationStatus, PendingDeployment,
};
use proofpay_deployer::verify::{
    VerificationError, VerificationOutcome, VerificationRequest, VerificationService,
};
use proofpay_deployer::workflow::WorkflowOptions;

pub const SIGNER: Address = Address::repeat_byte(0x5e);
pub const DEPLOYED: Address = Address::repeat_byte(0x11);
pub const DEPLOY_TX: TxHash = TxHash::repeat_byte(0xaa);
pub const CALL_TX: TxHash = TxHash::repeat_byte(0xbb);

/// Fast polling for tests.
pub fn fast_options(confirmations: u64) -> WorkflowOptions {
    WorkflowOptions {
        confirmations,
        confirmation_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(1),
    }
}

/// Every call the workflows made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCall {
    Deploy { creation_code: Bytes },
    SendTransaction { to: Address, input: Bytes },
    ConfirmationStatus(TxHash),
    Balance(Address),
    Call { to: Address, input: Bytes },
}

impl ChainCall {
    pub fn is_status_poll(&self) -> bool {
        matches!(self, ChainCall::ConfirmationStatus(_))
    }
}

/// Scripted [`ChainClient`].
///
/// Each confirmation poll consumes the next scripted status; the last one
/// repeats forever.
pub struct StubChain {
    reject_with: Option<String>,
    revert: bool,
    fail_queries: bool,
    script: Vec<ConfirmationStatus>,
    polls: AtomicUsize,
    balance: U256,
    call_result: Bytes,
    calls: Mutex<Vec<ChainCall>>,
}

impl StubChain {
    /// Pending once, then 1, 2, ..., `depth` confirmations.
    pub fn confirming_up_to(depth: u64) -> Self {
        let mut script = vec![ConfirmationStatus::Pending];
        script.extend((1..=depth).map(|confirmations| ConfirmationStatus::Included {
            block_number: 100,
            confirmations,
        }));
        Self::with_script(script)
    }

    /// Always pending.
    pub fn never_confirming() -> Self {
        Self::with_script(vec![ConfirmationStatus::Pending])
    }

    pub fn with_script(script: Vec<ConfirmationStatus>) -> Self {
        Self {
            reject_with: None,
            revert: false,
            fail_queries: false,
            script,
            polls: AtomicUsize::new(0),
            balance: U256::ZERO,
            call_result: Bytes::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        let mut stub = Self::confirming_up_to(6);
        stub.reject_with = Some(message.to_string());
        stub
    }

    pub fn reverting() -> Self {
        let mut stub = Self::confirming_up_to(6);
        stub.revert = true;
        stub
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_call_result(mut self, data: impl Into<Bytes>) -> Self {
        self.call_result = data.into();
        self
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than confirmation polls.
    pub fn actions(&self) -> Vec<ChainCall> {
        self.calls().into_iter().filter(|c| !c.is_status_poll()).collect()
    }

    pub fn status_polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    fn record(&self, call: ChainCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for StubChain {
    fn signer_address(&self) -> Address {
        SIGNER
    }

    async fn deploy(&self, creation_code: Bytes) -> ChainResult<PendingDeployment> {
        self.record(ChainCall::Deploy { creation_code });
        if let Some(message) = &self.reject_with {
            return Err(ChainError::Rejected(message.clone()));
        }
        Ok(PendingDeployment {
            tx_hash: DEPLOY_TX,
            contract_address: DEPLOYED,
        })
    }

    async fn send_transaction(&self, to: Address, input: Bytes) -> ChainResult<TxHash> {
        self.record(ChainCall::SendTransaction { to, input });
        if let Some(message) = &self.reject_with {
            return Err(ChainError::Rejected(message.clone()));
        }
        Ok(CALL_TX)
    }

    async fn confirmation_status(&self, tx_hash: TxHash) -> ChainResult<ConfirmationStatus> {
        self.record(ChainCall::ConfirmationStatus(tx_hash));
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        if self.revert {
            return Err(ChainError::Reverted(tx_hash));
        }
        let index = poll.min(self.script.len().saturating_sub(1));
        Ok(self
            .script
            .get(index)
            .copied()
            .unwrap_or(ConfirmationStatus::Pending))
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.record(ChainCall::Balance(address));
        if self.fail_queries {
            return Err(ChainError::Rpc("eth_getBalance: connection refused".into()));
        }
        Ok(self.balance)
    }

    async fn call(&self, to: Address, input: Bytes) -> ChainResult<Bytes> {
        self.record(ChainCall::Call { to, input });
        if self.fail_queries {
            return Err(ChainError::Rpc("eth_call: connection refused".into()));
        }
        Ok(self.call_result.clone())
    }
}

/// [`VerificationService`] with a fixed answer.
pub struct StubVerifier {
    result: Result<VerificationOutcome, String>,
    requests: Mutex<Vec<VerificationRequest>>,
}

impl StubVerifier {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(VerificationOutcome::Verified),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<VerificationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationService for StubVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result
            .clone()
            .map_err(VerificationError::Failed)
    }
}

/// One HTTP request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query string.
    pub target: String,
    pub body: String,
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// `respond` maps each request to a status code and body. Every request is
/// also recorded for later assertions.
pub async fn start_programmable_backend<F>(respond: F) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let log = recorded.clone();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let respond = respond.clone();
            let log = log.clone();
            tokio::spawn(async move {
                serve_one(socket, respond.as_ref(), &log).await;
            });
        }
    });

    (addr, recorded)
}

async fn serve_one<F>(mut socket: TcpStream, respond: &F, log: &Mutex<Vec<RecordedRequest>>)
where
    F: Fn(&RecordedRequest) -> (u16, String),
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    let (status, body) = respond(&request);
    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(RecordedRequest {
        method,
        target,
        body,
    })
}
