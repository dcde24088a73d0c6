// pn53x-rs/pn53x/src/driver/traits.rs

//! Reader backend traits.

use std::sync::Arc;

use crate::error::ErrorCode;
use crate::protocol::wire::WireTarget;
use crate::types::{BaudRate, DepMode, Mode, Modulation, ModulationKind, Property};

/// Result of a raw driver call. Counts are returned as `usize`.
pub type DriverResult<T> = std::result::Result<T, ErrorCode>;

/// Driver context: enumerates readers and opens them.
pub trait Driver: Send {
    /// Connection strings of up to `max` attached readers.
    fn enumerate(&mut self, max: usize) -> DriverResult<Vec<String>>;

    /// Open a reader. `None` selects the first available one.
    fn open(&mut self, connstring: Option<&str>) -> DriverResult<Box<dyn DriverHandle>>;

    /// Driver's own textual rendering of a target record.
    fn format_target(&self, target: &WireTarget, verbose: bool) -> DriverResult<String>;

    /// Driver library version.
    fn version(&self) -> String;
}

/// Interrupts a blocking call on the owning handle. Usable from any thread.
pub trait AbortSignal: Send + Sync {
    /// Request the abort.
    fn abort(&self) -> DriverResult<()>;
}

/// An opened reader.
///
/// Buffers are caller-owned; operations return the number of bytes (or bits,
/// for the bit-oriented calls) written into them. On
/// [`ErrorCode::Overflow`] the receive buffer holds the first `rx.len()`
/// received bytes. Timeouts use the raw encoding of
/// [`Timeout::as_raw`](crate::utils::Timeout::as_raw).
pub trait DriverHandle: Send {
    /// Release the reader. Called once.
    fn close(&mut self);

    /// Reader name as reported by the driver.
    fn name(&self) -> String;

    /// Connection string the reader was opened with.
    fn connstring(&self) -> String;

    /// Multi-line description of the reader and its chip.
    fn information(&mut self) -> DriverResult<String>;

    /// Status of the last failed operation.
    fn last_error(&self) -> ErrorCode;

    /// Set an integer property.
    fn set_property_int(&mut self, property: Property, value: i32) -> DriverResult<()>;

    /// Set a flag property.
    fn set_property_bool(&mut self, property: Property, enable: bool) -> DriverResult<()>;

    /// Modulation kinds available in `mode`.
    fn supported_modulations(&mut self, mode: Mode) -> DriverResult<Vec<ModulationKind>>;

    /// Bit rates available for `kind`.
    fn supported_baud_rates(&mut self, kind: ModulationKind) -> DriverResult<Vec<BaudRate>>;

    /// Turn the RF field off and put the chip to sleep.
    fn idle(&mut self) -> DriverResult<()>;

    /// Signal that interrupts this handle.
    fn abort_signal(&self) -> Arc<dyn AbortSignal>;

    /// Configure the chip as a reader.
    fn initiator_init(&mut self) -> DriverResult<()>;

    /// Configure the chip to talk to its secure element.
    fn initiator_init_secure_element(&mut self) -> DriverResult<()>;

    /// Select one passive target; returns the number of targets found (0 or 1).
    fn initiator_select_passive_target(
        &mut self,
        modulation: Modulation,
        init_data: &[u8],
        target: &mut WireTarget,
    ) -> DriverResult<usize>;

    /// Fill `targets` with passive targets in the field; returns how many.
    fn initiator_list_passive_targets(
        &mut self,
        modulation: Modulation,
        targets: &mut [WireTarget],
    ) -> DriverResult<usize>;

    /// Poll `modulations` in turn; returns the number of targets found.
    fn initiator_poll_target(
        &mut self,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
        target: &mut WireTarget,
    ) -> DriverResult<usize>;

    /// `initiator` carries the local DEP parameters (NFCID3, general bytes).
    fn initiator_select_dep_target(
        &mut self,
        mode: DepMode,
        baud_rate: BaudRate,
        initiator: Option<&WireTarget>,
        target: &mut WireTarget,
        timeout: i32,
    ) -> DriverResult<usize>;

    /// Release the selected target.
    fn initiator_deselect_target(&mut self) -> DriverResult<()>;

    /// `Ok` while the target (or the last selected one, for `None`) answers.
    fn initiator_target_is_present(&mut self, target: Option<&WireTarget>) -> DriverResult<()>;

    /// Exchange a byte frame; returns received bytes.
    fn initiator_transceive_bytes(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize>;

    /// Returns the number of received bits.
    fn initiator_transceive_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
        rx: &mut [u8],
        rx_parity: &mut [u8],
    ) -> DriverResult<usize>;

    /// `cycles` is the expected duration on entry (0 for the default) and the
    /// measured one on return.
    fn initiator_transceive_bytes_timed(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        cycles: &mut u32,
    ) -> DriverResult<usize>;

    /// Bit-level variant of the timed exchange.
    fn initiator_transceive_bits_timed(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
        rx: &mut [u8],
        rx_parity: &mut [u8],
        cycles: &mut u32,
    ) -> DriverResult<usize>;

    /// Emulate `target` until an initiator talks to us. The driver may
    /// complete the record; `rx` receives the first frame.
    fn target_init(
        &mut self,
        target: &mut WireTarget,
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize>;

    /// Send a byte frame while emulating; returns bytes sent.
    fn target_send_bytes(&mut self, tx: &[u8], timeout: i32) -> DriverResult<usize>;

    /// Receive a byte frame while emulating.
    fn target_receive_bytes(&mut self, rx: &mut [u8], timeout: i32) -> DriverResult<usize>;

    /// Send a bit frame while emulating; returns bits sent.
    fn target_send_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
    ) -> DriverResult<usize>;

    /// Receive a bit frame while emulating; returns bits received.
    fn target_receive_bits(&mut self, rx: &mut [u8], rx_parity: &mut [u8]) -> DriverResult<usize>;
}
