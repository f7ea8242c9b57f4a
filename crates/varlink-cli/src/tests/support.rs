//! Fake varlink service for behavioural tests.
//!
//! A thread holding a TCP listener that accepts a single connection, reads
//! one framed call, records it, and answers with a canned reply. This lets
//! dispatch tests verify request/response behaviour without a real
//! service.

use std::io::{self, BufReader};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result, anyhow};

use varlink_protocol::{Call, Reply, read_message, write_message};

pub(crate) struct FakeService {
    port: u16,
    requests: Arc<Mutex<Vec<Call>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeService {
    /// Spawns a fake service on an ephemeral port answering one call with
    /// `reply`.
    pub(crate) fn spawn(reply: Reply) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind fake service")?;
        listener
            .set_nonblocking(true)
            .context("fake service nonblocking")?;
        let port = listener.local_addr().context("local addr")?.port();
        let requests: Arc<Mutex<Vec<Call>>> = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            let _ = Self::serve(listener, &reply, &requests_clone);
        });
        Ok(Self {
            port,
            requests,
            handle: Some(handle),
        })
    }

    /// The `host:port` address text clients should resolve.
    pub(crate) fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Waits for the service thread and returns the recorded calls.
    pub(crate) fn take_requests(mut self) -> Result<Vec<Call>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("fake service thread panicked"))?;
        }
        let requests = self
            .requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?;
        Ok(requests.clone())
    }

    fn serve(
        listener: TcpListener,
        reply: &Reply,
        requests: &Arc<Mutex<Vec<Call>>>,
    ) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match listener.accept() {
                Ok((stream, _)) => return Self::answer(stream, reply, requests),
                Err(ref error)
                    if error.kind() == io::ErrorKind::WouldBlock && Instant::now() < deadline =>
                {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(ref error) if error.kind() == io::ErrorKind::WouldBlock => {
                    // No client connected; exit cleanly so tests that abort
                    // before calling do not hang.
                    return Ok(());
                }
                Err(error) => return Err(error).context("accept connection"),
            }
        }
    }

    fn answer(
        stream: TcpStream,
        reply: &Reply,
        requests: &Arc<Mutex<Vec<Call>>>,
    ) -> Result<()> {
        stream.set_nonblocking(false).context("stream blocking")?;
        let mut reader = BufReader::new(stream.try_clone().context("clone stream")?);
        let call: Call = read_message(&mut reader).context("read call")?;
        requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?
            .push(call);
        let mut stream = stream;
        write_message(&mut stream, reply).context("write reply")?;
        Ok(())
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
