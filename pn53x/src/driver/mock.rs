// pn53x-rs/pn53x/src/driver/mock.rs

//! Scripted in-memory driver for tests.
//!
//! A [`MockDevice`] is a cheap clonable handle on shared state, so a test can
//! keep one copy for inspection after handing another to a driver.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::driver::traits::{AbortSignal, Driver, DriverHandle, DriverResult};
use crate::error::ErrorCode;
use crate::protocol::odd_parity_bits;
use crate::protocol::wire::WireTarget;
use crate::target::{Target, describe};
use crate::types::{BaudRate, DepMode, Mode, Modulation, ModulationKind, Property};
use crate::utils::Timeout;
use crate::Result;

/// How long a blocking mock call waits when asked for the driver default.
pub const MOCK_DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// One queued answer to a receive-type call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Byte frame.
    Bytes(Vec<u8>),
    /// Bit frame with its parity bits.
    Bits {
        /// Packed frame bits.
        data: Vec<u8>,
        /// One parity bit per byte.
        parity: Vec<u8>,
        /// Frame length in bits.
        bits: usize,
    },
    /// Failure to report instead of a frame.
    Error(ErrorCode),
}

/// Observable state of a mock reader.
#[derive(Debug, Default)]
pub struct MockState {
    /// Names of the driver operations invoked, in order.
    pub calls: Vec<String>,
    /// Transmitted frames.
    pub sent: Vec<Vec<u8>>,
    /// Parity arrays of transmitted bit frames.
    pub sent_parity: Vec<Vec<u8>>,
    /// Answers for upcoming receive calls.
    pub replies: VecDeque<MockReply>,
    /// Targets in the field.
    pub targets: Vec<WireTarget>,
    /// Record `target_init` writes back, if any.
    pub emulation_update: Option<WireTarget>,
    /// Property writes, flags stored as 0 or 1.
    pub properties: Vec<(Property, i32)>,
    /// Reported by `supported_modulations`.
    pub modulations: Vec<ModulationKind>,
    /// Reported by `supported_baud_rates`.
    pub baud_rates: Vec<BaudRate>,
    /// Cycle count reported by the timed transceive calls.
    pub cycles: Option<u32>,
    /// Wait for a reply instead of timing out immediately.
    pub block_when_empty: bool,
    /// Pending abort request.
    pub aborted: bool,
    /// Set once the handle is closed.
    pub closed: bool,
    /// Status of the last failed call.
    pub last_error: Option<ErrorCode>,
    failures: Vec<(String, ErrorCode)>,
}

impl MockState {
    fn take_failure(&mut self, op: &str) -> Option<ErrorCode> {
        let idx = self.failures.iter().position(|(name, _)| name == op)?;
        Some(self.failures.remove(idx).1)
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<MockState>,
    wake: Condvar,
}

/// Clonable handle on a mock reader.
#[derive(Debug, Clone)]
pub struct MockDevice {
    name: String,
    connstring: String,
    shared: Arc<Shared>,
}

impl MockDevice {
    /// Reader with empty state.
    pub fn new(name: impl Into<String>, connstring: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connstring: connstring.into(),
            shared: Arc::default(),
        }
    }

    /// Open this reader directly, bypassing a driver.
    pub fn open(&self) -> Box<dyn DriverHandle> {
        {
            let mut st = self.state();
            st.closed = false;
            st.calls.push("open".to_string());
        }
        Box::new(MockHandle {
            device: self.clone(),
        })
    }

    /// Connection string this reader answers to.
    pub fn connstring(&self) -> &str {
        &self.connstring
    }

    /// Lock the shared state for inspection or scripting.
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an answer and wake blocked receivers.
    pub fn push_reply(&self, reply: MockReply) {
        self.state().replies.push_back(reply);
        self.shared.wake.notify_all();
    }

    /// Queue a byte frame.
    pub fn push_bytes(&self, data: impl Into<Vec<u8>>) {
        self.push_reply(MockReply::Bytes(data.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, code: ErrorCode) {
        self.push_reply(MockReply::Error(code));
    }

    /// Place a target in the field.
    pub fn add_target(&self, target: &Target) -> Result<()> {
        let wire = target.encode()?;
        self.state().targets.push(wire);
        Ok(())
    }

    /// Make the next call to `op` fail with `code`.
    pub fn fail_next(&self, op: &str, code: ErrorCode) {
        self.state().failures.push((op.to_string(), code));
    }

    /// Block on an empty reply queue until the timeout.
    pub fn set_block_when_empty(&self, block: bool) {
        self.state().block_when_empty = block;
    }

    /// Operations invoked so far.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Frames transmitted so far.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    /// Whether the last opened handle was closed.
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Last value set for `property`.
    pub fn property(&self, property: Property) -> Option<i32> {
        self.state()
            .properties
            .iter()
            .rev()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    fn begin(&self, op: &str) -> DriverResult<MutexGuard<'_, MockState>> {
        let mut st = self.state();
        st.calls.push(op.to_string());
        match st.take_failure(op) {
            Some(code) => {
                st.last_error = Some(code);
                Err(code)
            }
            None => Ok(st),
        }
    }

    /// Pop the next reply, blocking while allowed to.
    fn next_reply(&self, op: &str, timeout: i32) -> DriverResult<MockReply> {
        let mut st = self.begin(op)?;
        let deadline = Timeout::from_raw(timeout)
            .duration(MOCK_DEFAULT_TIMEOUT)
            .map(|d| Instant::now() + d);
        loop {
            if st.aborted {
                st.aborted = false;
                st.last_error = Some(ErrorCode::Aborted);
                return Err(ErrorCode::Aborted);
            }
            if let Some(reply) = st.replies.pop_front() {
                if let MockReply::Error(code) = reply {
                    st.last_error = Some(code);
                }
                return Ok(reply);
            }
            if !st.block_when_empty {
                st.last_error = Some(ErrorCode::Timeout);
                return Err(ErrorCode::Timeout);
            }
            st = match deadline {
                None => self
                    .shared
                    .wake
                    .wait(st)
                    .unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        st.last_error = Some(ErrorCode::Timeout);
                        return Err(ErrorCode::Timeout);
                    }
                    self.shared
                        .wake
                        .wait_timeout(st, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }

    fn record_tx(&self, tx: &[u8], parity: Option<&[u8]>) {
        let mut st = self.state();
        st.sent.push(tx.to_vec());
        if let Some(p) = parity {
            st.sent_parity.push(p.to_vec());
        }
    }

    fn first_target(&self, accept: impl Fn(&WireTarget) -> bool) -> Option<WireTarget> {
        self.state().targets.iter().find(|w| accept(w)).cloned()
    }
}

fn copy_bytes(reply: MockReply, rx: &mut [u8]) -> DriverResult<usize> {
    let data = match reply {
        MockReply::Bytes(data) => data,
        MockReply::Bits { data, .. } => data,
        MockReply::Error(code) => return Err(code),
    };
    let n = data.len().min(rx.len());
    rx[..n].copy_from_slice(&data[..n]);
    if data.len() > rx.len() {
        return Err(ErrorCode::Overflow);
    }
    Ok(n)
}

fn copy_bits(reply: MockReply, rx: &mut [u8], rx_parity: &mut [u8]) -> DriverResult<usize> {
    let (data, parity, bits) = match reply {
        MockReply::Bits { data, parity, bits } => (data, parity, bits),
        MockReply::Bytes(data) => {
            let parity = odd_parity_bits(&data);
            let bits = data.len() * 8;
            (data, parity, bits)
        }
        MockReply::Error(code) => return Err(code),
    };
    let n = data.len().min(rx.len());
    rx[..n].copy_from_slice(&data[..n]);
    let p = parity.len().min(rx_parity.len());
    rx_parity[..p].copy_from_slice(&parity[..p]);
    if data.len() > rx.len() {
        return Err(ErrorCode::Overflow);
    }
    Ok(bits)
}

struct MockAbort {
    shared: Arc<Shared>,
}

impl AbortSignal for MockAbort {
    fn abort(&self) -> DriverResult<()> {
        let mut st = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        st.calls.push("abort_command".to_string());
        st.aborted = true;
        drop(st);
        self.shared.wake.notify_all();
        Ok(())
    }
}

struct MockHandle {
    device: MockDevice,
}

impl DriverHandle for MockHandle {
    fn close(&mut self) {
        let mut st = self.device.state();
        st.calls.push("close".to_string());
        st.closed = true;
    }

    fn name(&self) -> String {
        self.device.name.clone()
    }

    fn connstring(&self) -> String {
        self.device.connstring.clone()
    }

    fn information(&mut self) -> DriverResult<String> {
        self.device.begin("information")?;
        Ok(format!(
            "{} opened\nconnection: {}\nchip: mock PN53x\n",
            self.device.name, self.device.connstring
        ))
    }

    fn last_error(&self) -> ErrorCode {
        self.device.state().last_error.unwrap_or(ErrorCode::Success)
    }

    fn set_property_int(&mut self, property: Property, value: i32) -> DriverResult<()> {
        self.device.begin("set_property_int")?.properties.push((property, value));
        Ok(())
    }

    fn set_property_bool(&mut self, property: Property, enable: bool) -> DriverResult<()> {
        self.device
            .begin("set_property_bool")?
            .properties
            .push((property, i32::from(enable)));
        Ok(())
    }

    fn supported_modulations(&mut self, _mode: Mode) -> DriverResult<Vec<ModulationKind>> {
        Ok(self.device.begin("supported_modulations")?.modulations.clone())
    }

    fn supported_baud_rates(&mut self, _kind: ModulationKind) -> DriverResult<Vec<BaudRate>> {
        Ok(self.device.begin("supported_baud_rates")?.baud_rates.clone())
    }

    fn idle(&mut self) -> DriverResult<()> {
        self.device.begin("idle")?;
        Ok(())
    }

    fn abort_signal(&self) -> Arc<dyn AbortSignal> {
        Arc::new(MockAbort {
            shared: Arc::clone(&self.device.shared),
        })
    }

    fn initiator_init(&mut self) -> DriverResult<()> {
        self.device.begin("initiator_init")?;
        Ok(())
    }

    fn initiator_init_secure_element(&mut self) -> DriverResult<()> {
        self.device.begin("initiator_init_secure_element")?;
        Ok(())
    }

    fn initiator_select_passive_target(
        &mut self,
        modulation: Modulation,
        init_data: &[u8],
        target: &mut WireTarget,
    ) -> DriverResult<usize> {
        drop(self.device.begin("initiator_select_passive_target")?);
        if !init_data.is_empty() {
            self.device.record_tx(init_data, None);
        }
        match self.device.first_target(|w| w.modulation() == Some(modulation)) {
            Some(found) => {
                *target = found;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn initiator_list_passive_targets(
        &mut self,
        modulation: Modulation,
        targets: &mut [WireTarget],
    ) -> DriverResult<usize> {
        let st = self.device.begin("initiator_list_passive_targets")?;
        let matching = st
            .targets
            .iter()
            .filter(|w| w.modulation() == Some(modulation));
        let mut n = 0;
        for (slot, found) in targets.iter_mut().zip(matching) {
            *slot = found.clone();
            n += 1;
        }
        Ok(n)
    }

    fn initiator_poll_target(
        &mut self,
        modulations: &[Modulation],
        _poll_nr: u8,
        _period: u8,
        target: &mut WireTarget,
    ) -> DriverResult<usize> {
        drop(self.device.begin("initiator_poll_target")?);
        let found = self.device.first_target(|w| {
            w.modulation()
                .map(|m| modulations.contains(&m))
                .unwrap_or(false)
        });
        match found {
            Some(found) => {
                *target = found;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn initiator_select_dep_target(
        &mut self,
        mode: DepMode,
        baud_rate: BaudRate,
        initiator: Option<&WireTarget>,
        target: &mut WireTarget,
        _timeout: i32,
    ) -> DriverResult<usize> {
        drop(self.device.begin("initiator_select_dep_target")?);
        if let Some(local) = initiator {
            self.device.record_tx(local.info(), None);
        }
        let found = self.device.first_target(|w| {
            w.modulation() == Some(Modulation::new(ModulationKind::Dep, baud_rate))
                && matches!(Target::decode(w), Target::Dep(ref d) if d.dep_mode == mode)
        });
        match found {
            Some(found) => {
                *target = found;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn initiator_deselect_target(&mut self) -> DriverResult<()> {
        self.device.begin("initiator_deselect_target")?;
        Ok(())
    }

    fn initiator_target_is_present(&mut self, target: Option<&WireTarget>) -> DriverResult<()> {
        let mut st = self.device.begin("initiator_target_is_present")?;
        let present = match target {
            Some(t) => st.targets.iter().any(|w| w == t),
            None => !st.targets.is_empty(),
        };
        if present {
            Ok(())
        } else {
            st.last_error = Some(ErrorCode::TargetReleased);
            Err(ErrorCode::TargetReleased)
        }
    }

    fn initiator_transceive_bytes(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize> {
        self.device.record_tx(tx, None);
        let reply = self.device.next_reply("initiator_transceive_bytes", timeout)?;
        copy_bytes(reply, rx)
    }

    fn initiator_transceive_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
        rx: &mut [u8],
        rx_parity: &mut [u8],
    ) -> DriverResult<usize> {
        self.device.record_tx(&tx[..tx_bits.div_ceil(8)], Some(tx_parity));
        let reply = self.device.next_reply("initiator_transceive_bits", -1)?;
        copy_bits(reply, rx, rx_parity)
    }

    fn initiator_transceive_bytes_timed(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        cycles: &mut u32,
    ) -> DriverResult<usize> {
        self.device.record_tx(tx, None);
        let reply = self
            .device
            .next_reply("initiator_transceive_bytes_timed", -1)?;
        if let Some(measured) = self.device.state().cycles {
            *cycles = measured;
        }
        copy_bytes(reply, rx)
    }

    fn initiator_transceive_bits_timed(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
        rx: &mut [u8],
        rx_parity: &mut [u8],
        cycles: &mut u32,
    ) -> DriverResult<usize> {
        self.device.record_tx(&tx[..tx_bits.div_ceil(8)], Some(tx_parity));
        let reply = self
            .device
            .next_reply("initiator_transceive_bits_timed", -1)?;
        if let Some(measured) = self.device.state().cycles {
            *cycles = measured;
        }
        copy_bits(reply, rx, rx_parity)
    }

    fn target_init(
        &mut self,
        target: &mut WireTarget,
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize> {
        let reply = self.device.next_reply("target_init", timeout)?;
        if let Some(update) = self.device.state().emulation_update.take() {
            *target = update;
        }
        copy_bytes(reply, rx)
    }

    fn target_send_bytes(&mut self, tx: &[u8], _timeout: i32) -> DriverResult<usize> {
        drop(self.device.begin("target_send_bytes")?);
        self.device.record_tx(tx, None);
        Ok(tx.len())
    }

    fn target_receive_bytes(&mut self, rx: &mut [u8], timeout: i32) -> DriverResult<usize> {
        let reply = self.device.next_reply("target_receive_bytes", timeout)?;
        copy_bytes(reply, rx)
    }

    fn target_send_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
    ) -> DriverResult<usize> {
        drop(self.device.begin("target_send_bits")?);
        self.device
            .record_tx(&tx[..tx_bits.div_ceil(8)], Some(tx_parity));
        Ok(tx_bits)
    }

    fn target_receive_bits(&mut self, rx: &mut [u8], rx_parity: &mut [u8]) -> DriverResult<usize> {
        let reply = self.device.next_reply("target_receive_bits", -1)?;
        copy_bits(reply, rx, rx_parity)
    }
}

/// Driver over a fixed set of [`MockDevice`]s.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    devices: Vec<MockDevice>,
    format_failure: Option<ErrorCode>,
}

impl MockDriver {
    /// Driver without readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reader, builder style.
    pub fn with_device(mut self, device: MockDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Add a reader.
    pub fn add_device(&mut self, device: MockDevice) {
        self.devices.push(device);
    }

    /// Make every `format_target` call fail with `code`.
    pub fn fail_format(mut self, code: ErrorCode) -> Self {
        self.format_failure = Some(code);
        self
    }
}

impl Driver for MockDriver {
    fn enumerate(&mut self, max: usize) -> DriverResult<Vec<String>> {
        Ok(self
            .devices
            .iter()
            .take(max)
            .map(|d| d.connstring.clone())
            .collect())
    }

    fn open(&mut self, connstring: Option<&str>) -> DriverResult<Box<dyn DriverHandle>> {
        let device = match connstring {
            None => self.devices.first(),
            Some(wanted) => self.devices.iter().find(|d| d.connstring == wanted),
        }
        .ok_or(ErrorCode::NoSuchDevice)?;
        Ok(device.open())
    }

    fn format_target(&self, target: &WireTarget, verbose: bool) -> DriverResult<String> {
        if let Some(code) = self.format_failure {
            return Err(code);
        }
        if target.modulation().is_none() {
            return Err(ErrorCode::InvalidArgument);
        }
        Ok(describe(&Target::decode(target), verbose))
    }

    fn version(&self) -> String {
        format!("mock-{}", env!("CARGO_PKG_VERSION"))
    }
}
