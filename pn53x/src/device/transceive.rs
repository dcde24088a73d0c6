// pn53x-rs/pn53x/src/device/transceive.rs

//! Frame exchange, as initiator and as emulated target.
//!
//! Byte-oriented calls leave parity (and, depending on
//! [`Property::HandleCrc`](crate::types::Property::HandleCrc), the CRC) to
//! the chip. Bit-oriented calls send exactly `tx_bits` bits with
//! caller-supplied parity and hand back the received parity bits.
//!
//! When a response does not fit the receive capacity the call fails with
//! [`Error::Overflow`]; `partial` then holds exactly the first
//! `rx_capacity` bytes that were received.

use crate::device::handle::Device;
use crate::protocol::wire::WireTarget;
use crate::target::Target;
use crate::utils::{Timeout, hex};
use crate::{Error, Result};

/// A received bit-oriented frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitFrame {
    /// Received bytes; the last one may be partial.
    pub data: Vec<u8>,
    /// One parity bit per byte of `data`.
    pub parity: Vec<u8>,
    /// Number of valid bits in `data`.
    pub bits: usize,
}

fn check_bytes_out(tx: &[u8]) -> Result<()> {
    if tx.is_empty() {
        return Err(Error::invalid("empty transmit frame"));
    }
    Ok(())
}

fn check_bits_out(tx: &[u8], tx_parity: &[u8], tx_bits: usize) -> Result<()> {
    check_bytes_out(tx)?;
    if tx_parity.len() != tx.len() {
        return Err(Error::invalid(format!(
            "{} parity bytes for {} data bytes",
            tx_parity.len(),
            tx.len()
        )));
    }
    if tx_bits == 0 || tx_bits > tx.len() * 8 {
        return Err(Error::invalid(format!(
            "{} bits do not fit a {} byte frame",
            tx_bits,
            tx.len()
        )));
    }
    Ok(())
}

fn rx_buffer(rx_capacity: usize) -> Result<Vec<u8>> {
    if rx_capacity == 0 {
        return Err(Error::invalid("receive capacity must be positive"));
    }
    Ok(vec![0u8; rx_capacity])
}

/// Data and parity buffers sized for `rx_capacity_bits`.
fn rx_bit_buffers(rx_capacity_bits: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    let len = rx_capacity_bits.div_ceil(8);
    Ok((rx_buffer(len)?, vec![0u8; len]))
}

/// Trim the receive buffer to what arrived, or surface it as overflow data.
fn received(mut rx: Vec<u8>, outcome: Result<usize>) -> Result<Vec<u8>> {
    match outcome {
        Ok(n) => {
            rx.truncate(n);
            log::trace!("rx {}", hex(&rx));
            Ok(rx)
        }
        Err(Error::Overflow { .. }) => {
            log::debug!("response overflowed {} byte buffer", rx.len());
            Err(Error::Overflow { partial: rx })
        }
        Err(e) => Err(e),
    }
}

fn received_bits(mut data: Vec<u8>, mut parity: Vec<u8>, outcome: Result<usize>) -> Result<BitFrame> {
    match outcome {
        Ok(bits) => {
            let len = bits.div_ceil(8).min(data.len());
            data.truncate(len);
            parity.truncate(len);
            log::trace!("rx {} bits: {}", bits, hex(&data));
            Ok(BitFrame { data, parity, bits })
        }
        Err(Error::Overflow { .. }) => Err(Error::Overflow { partial: data }),
        Err(e) => Err(e),
    }
}

impl Device {
    /// Send `tx` and collect up to `rx_capacity` response bytes.
    pub fn transceive_bytes(
        &mut self,
        tx: &[u8],
        rx_capacity: usize,
        timeout: Timeout,
    ) -> Result<Vec<u8>> {
        self.ensure_open()?;
        check_bytes_out(tx)?;
        let mut rx = rx_buffer(rx_capacity)?;
        log::trace!("tx {}", hex(tx));
        let outcome = self.with_handle("initiator_transceive_bytes", |h| {
            h.initiator_transceive_bytes(tx, &mut rx, timeout.as_raw())
        });
        received(rx, outcome)
    }

    /// Like [`Device::transceive_bytes`], timed in chip cycles instead of a
    /// timeout. `cycles` = 0 asks for the driver default; the measured
    /// count is returned with the response.
    pub fn transceive_bytes_timed(
        &mut self,
        tx: &[u8],
        rx_capacity: usize,
        cycles: u32,
    ) -> Result<(Vec<u8>, u32)> {
        self.ensure_open()?;
        check_bytes_out(tx)?;
        let mut rx = rx_buffer(rx_capacity)?;
        let mut cycles = cycles;
        let outcome = self.with_handle("initiator_transceive_bytes_timed", |h| {
            h.initiator_transceive_bytes_timed(tx, &mut rx, &mut cycles)
        });
        let rx = received(rx, outcome)?;
        log::trace!("exchange took {} cycles", cycles);
        Ok((rx, cycles))
    }

    /// Send a raw bit frame. `tx_parity` holds one parity bit per byte of
    /// `tx`; the response is limited to `rx_capacity_bits`.
    pub fn transceive_bits(
        &mut self,
        tx: &[u8],
        tx_parity: &[u8],
        tx_bits: usize,
        rx_capacity_bits: usize,
    ) -> Result<BitFrame> {
        self.ensure_open()?;
        check_bits_out(tx, tx_parity, tx_bits)?;
        let (mut rx, mut rx_parity) = rx_bit_buffers(rx_capacity_bits)?;
        log::trace!("tx {} bits: {}", tx_bits, hex(tx));
        let outcome = self.with_handle("initiator_transceive_bits", |h| {
            h.initiator_transceive_bits(tx, tx_bits, tx_parity, &mut rx, &mut rx_parity)
        });
        received_bits(rx, rx_parity, outcome)
    }

    /// Bit frame exchange that also reports the measured cycle count.
    pub fn transceive_bits_timed(
        &mut self,
        tx: &[u8],
        tx_parity: &[u8],
        tx_bits: usize,
        rx_capacity_bits: usize,
        cycles: u32,
    ) -> Result<(BitFrame, u32)> {
        self.ensure_open()?;
        check_bits_out(tx, tx_parity, tx_bits)?;
        let (mut rx, mut rx_parity) = rx_bit_buffers(rx_capacity_bits)?;
        let mut cycles = cycles;
        let outcome = self.with_handle("initiator_transceive_bits_timed", |h| {
            h.initiator_transceive_bits_timed(
                tx,
                tx_bits,
                tx_parity,
                &mut rx,
                &mut rx_parity,
                &mut cycles,
            )
        });
        let frame = received_bits(rx, rx_parity, outcome)?;
        log::trace!("exchange took {} cycles", cycles);
        Ok((frame, cycles))
    }

    /// Emulate `target` and wait for an initiator.
    ///
    /// Returns the target as completed by the driver together with the
    /// first frame the initiator sent.
    pub fn target_init(
        &mut self,
        target: &Target,
        rx_capacity: usize,
        timeout: Timeout,
    ) -> Result<(Target, Vec<u8>)> {
        self.ensure_open()?;
        let mut wire: WireTarget = target.encode()?;
        let mut rx = rx_buffer(rx_capacity)?;
        log::debug!("target mode as {}", target.modulation());
        let outcome = self.with_handle("target_init", |h| {
            h.target_init(&mut wire, &mut rx, timeout.as_raw())
        });
        let rx = received(rx, outcome)?;
        Ok((Target::decode(&wire), rx))
    }

    /// Send a response while emulating a target. Returns bytes sent.
    pub fn target_send_bytes(&mut self, tx: &[u8], timeout: Timeout) -> Result<usize> {
        self.ensure_open()?;
        check_bytes_out(tx)?;
        log::trace!("tx {}", hex(tx));
        self.with_handle("target_send_bytes", |h| {
            h.target_send_bytes(tx, timeout.as_raw())
        })
    }

    /// Receive a byte frame while emulating a target.
    pub fn target_receive_bytes(&mut self, rx_capacity: usize, timeout: Timeout) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let mut rx = rx_buffer(rx_capacity)?;
        let outcome = self.with_handle("target_receive_bytes", |h| {
            h.target_receive_bytes(&mut rx, timeout.as_raw())
        });
        received(rx, outcome)
    }

    /// Send a raw bit frame while emulating a target. Returns bits sent.
    pub fn target_send_bits(&mut self, tx: &[u8], tx_parity: &[u8], tx_bits: usize) -> Result<usize> {
        self.ensure_open()?;
        check_bits_out(tx, tx_parity, tx_bits)?;
        self.with_handle("target_send_bits", |h| {
            h.target_send_bits(tx, tx_bits, tx_parity)
        })
    }

    /// Receive a raw bit frame while emulating a target.
    pub fn target_receive_bits(&mut self, rx_capacity_bits: usize) -> Result<BitFrame> {
        self.ensure_open()?;
        let (mut rx, mut rx_parity) = rx_bit_buffers(rx_capacity_bits)?;
        let outcome = self.with_handle("target_receive_bits", |h| {
            h.target_receive_bits(&mut rx, &mut rx_parity)
        });
        received_bits(rx, rx_parity, outcome)
    }
}
