//! Scripted transport for exercising readers and pollers without a bus

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

use rfpad_core::Frame;
use rfpad_transport::Transport;
use rfpad_types::DeviceSelector;

/// Handles into a scripted transport after it has been boxed away
#[derive(Clone, Default)]
pub struct TransportProbe {
    written: Arc<Mutex<Vec<Vec<u8>>>>,
    closes: Arc<AtomicUsize>,
}

impl TransportProbe {
    /// Every request frame sent so far
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }

    /// How many times the transport was actually released
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Transport that replays queued response frames
///
/// Once the queue is drained, further reads report a timeout.
pub struct ScriptedTransport {
    open: bool,
    fail_open: bool,
    accept: Option<usize>,
    responses: VecDeque<Vec<u8>>,
    probe: TransportProbe,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Vec<u8>>) -> Self {
        Self {
            open: false,
            fail_open: false,
            accept: None,
            responses: responses.into(),
            probe: TransportProbe::default(),
        }
    }

    /// A transport whose open always fails
    pub fn failing_open() -> Self {
        let mut transport = Self::new(vec![]);
        transport.fail_open = true;
        transport
    }

    /// Accept only `n` bytes per write (simulates a short write)
    pub fn with_accept(mut self, n: usize) -> Self {
        self.accept = Some(n);
        self
    }

    pub fn probe(&self) -> TransportProbe {
        self.probe.clone()
    }
}

/// Encode a device response frame around a payload
pub fn response_frame(payload: &[u8]) -> Vec<u8> {
    Frame::new(payload.to_vec()).encode().unwrap().to_vec()
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn open(&mut self) -> rfpad_transport::Result<()> {
        if self.fail_open {
            return Err(rfpad_transport::Error::DeviceNotFound(
                DeviceSelector::default(),
            ));
        }
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> rfpad_transport::Result<()> {
        self.open = false;
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    async fn send(&mut self, data: &[u8], _timeout: Duration) -> rfpad_transport::Result<usize> {
        self.probe.written.lock().unwrap().push(data.to_vec());
        Ok(self.accept.unwrap_or(data.len()))
    }

    async fn receive(
        &mut self,
        _max_len: usize,
        _timeout: Duration,
    ) -> rfpad_transport::Result<BytesMut> {
        match self.responses.pop_front() {
            Some(bytes) => Ok(BytesMut::from(&bytes[..])),
            None => Err(rfpad_transport::Error::ReadTimeout),
        }
    }

    fn descriptor(&self) -> String {
        "scripted".into()
    }
}
