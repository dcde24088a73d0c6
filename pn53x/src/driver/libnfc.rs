// pn53x-rs/pn53x/src/driver/libnfc.rs

//! Binding of the driver traits to the system libnfc.
//!
//! Wire records are handed to libnfc as `nfc_target *` directly; the byte
//! image in [`WireTarget`] matches the packed C layout.

use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::ptr;
use std::sync::{Arc, Mutex, PoisonError};

use crate::constants::{BUFSIZE_CONNSTRING, MAX_CONNSTRING_LEN};
use crate::driver::traits::{AbortSignal, Driver, DriverHandle, DriverResult};
use crate::error::ErrorCode;
use crate::protocol::wire::WireTarget;
use crate::types::{BaudRate, DepMode, Mode, Modulation, ModulationKind, Property};
use crate::{Error, Result};

#[allow(non_camel_case_types)]
type nfc_context = c_void;
#[allow(non_camel_case_types)]
type nfc_device = c_void;
#[allow(non_camel_case_types)]
type nfc_connstring = [c_char; BUFSIZE_CONNSTRING];

#[repr(C)]
#[derive(Clone, Copy)]
struct NfcModulation {
    nmt: c_int,
    nbr: c_int,
}

impl From<Modulation> for NfcModulation {
    fn from(m: Modulation) -> Self {
        Self {
            nmt: m.kind.as_raw(),
            nbr: m.baud_rate.as_raw(),
        }
    }
}

#[link(name = "nfc")]
unsafe extern "C" {
    fn nfc_init(context: *mut *mut nfc_context);
    fn nfc_exit(context: *mut nfc_context);
    fn nfc_version() -> *const c_char;
    fn nfc_free(p: *mut c_void);
    fn nfc_list_devices(
        context: *mut nfc_context,
        connstrings: *mut nfc_connstring,
        len: usize,
    ) -> usize;
    fn nfc_open(context: *mut nfc_context, connstring: *const c_char) -> *mut nfc_device;
    fn nfc_close(pnd: *mut nfc_device);
    fn nfc_abort_command(pnd: *mut nfc_device) -> c_int;
    fn nfc_idle(pnd: *mut nfc_device) -> c_int;
    fn nfc_device_get_name(pnd: *mut nfc_device) -> *const c_char;
    fn nfc_device_get_connstring(pnd: *mut nfc_device) -> *const c_char;
    fn nfc_device_get_last_error(pnd: *const nfc_device) -> c_int;
    fn nfc_device_get_information_about(pnd: *mut nfc_device, buf: *mut *mut c_char) -> c_int;
    fn nfc_device_set_property_int(pnd: *mut nfc_device, property: c_int, value: c_int) -> c_int;
    fn nfc_device_set_property_bool(pnd: *mut nfc_device, property: c_int, enable: bool) -> c_int;
    fn nfc_device_get_supported_modulation(
        pnd: *mut nfc_device,
        mode: c_int,
        supported: *mut *const c_int,
    ) -> c_int;
    fn nfc_device_get_supported_baud_rate(
        pnd: *mut nfc_device,
        nmt: c_int,
        supported: *mut *const c_int,
    ) -> c_int;
    fn nfc_initiator_init(pnd: *mut nfc_device) -> c_int;
    fn nfc_initiator_init_secure_element(pnd: *mut nfc_device) -> c_int;
    fn nfc_initiator_select_passive_target(
        pnd: *mut nfc_device,
        nm: NfcModulation,
        init_data: *const u8,
        init_len: usize,
        pnt: *mut u8,
    ) -> c_int;
    fn nfc_initiator_list_passive_targets(
        pnd: *mut nfc_device,
        nm: NfcModulation,
        targets: *mut u8,
        len: usize,
    ) -> c_int;
    fn nfc_initiator_poll_target(
        pnd: *mut nfc_device,
        modulations: *const NfcModulation,
        len: usize,
        poll_nr: u8,
        period: u8,
        pnt: *mut u8,
    ) -> c_int;
    fn nfc_initiator_select_dep_target(
        pnd: *mut nfc_device,
        ndm: c_int,
        nbr: c_int,
        initiator: *const u8,
        pnt: *mut u8,
        timeout: c_int,
    ) -> c_int;
    fn nfc_initiator_deselect_target(pnd: *mut nfc_device) -> c_int;
    fn nfc_initiator_target_is_present(pnd: *mut nfc_device, pnt: *const u8) -> c_int;
    fn nfc_initiator_transceive_bytes(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_len: usize,
        rx: *mut u8,
        rx_len: usize,
        timeout: c_int,
    ) -> c_int;
    fn nfc_initiator_transceive_bits(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_bits: usize,
        tx_par: *const u8,
        rx: *mut u8,
        rx_len: usize,
        rx_par: *mut u8,
    ) -> c_int;
    fn nfc_initiator_transceive_bytes_timed(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_len: usize,
        rx: *mut u8,
        rx_len: usize,
        cycles: *mut u32,
    ) -> c_int;
    fn nfc_initiator_transceive_bits_timed(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_bits: usize,
        tx_par: *const u8,
        rx: *mut u8,
        rx_len: usize,
        rx_par: *mut u8,
        cycles: *mut u32,
    ) -> c_int;
    fn nfc_target_init(
        pnd: *mut nfc_device,
        pnt: *mut u8,
        rx: *mut u8,
        rx_len: usize,
        timeout: c_int,
    ) -> c_int;
    fn nfc_target_send_bytes(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_len: usize,
        timeout: c_int,
    ) -> c_int;
    fn nfc_target_receive_bytes(
        pnd: *mut nfc_device,
        rx: *mut u8,
        rx_len: usize,
        timeout: c_int,
    ) -> c_int;
    fn nfc_target_send_bits(
        pnd: *mut nfc_device,
        tx: *const u8,
        tx_bits: usize,
        tx_par: *const u8,
    ) -> c_int;
    fn nfc_target_receive_bits(
        pnd: *mut nfc_device,
        rx: *mut u8,
        rx_len: usize,
        rx_par: *mut u8,
    ) -> c_int;
    fn str_nfc_target(buf: *mut *mut c_char, pnt: *const u8, verbose: bool) -> c_int;
}

/// Copy a C string owned by libnfc.
///
/// # Safety
///
/// `p` must be null or point to a NUL-terminated string.
unsafe fn owned_string(p: *const c_char) -> String {
    if p.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
}

/// Copy and release a string libnfc allocated for us.
///
/// # Safety
///
/// `p` must be null or a string allocated by libnfc.
unsafe fn take_string(p: *mut c_char) -> String {
    let s = unsafe { owned_string(p) };
    if !p.is_null() {
        unsafe { nfc_free(p.cast()) };
    }
    s
}

/// Collect a zero-terminated enum array.
///
/// # Safety
///
/// `p` must be null or point to a 0-terminated `int` array.
unsafe fn zero_terminated(p: *const c_int) -> Vec<c_int> {
    let mut out = Vec::new();
    if p.is_null() {
        return out;
    }
    let mut i = 0;
    loop {
        let v = unsafe { *p.add(i) };
        if v == 0 {
            return out;
        }
        out.push(v);
        i += 1;
    }
}

fn status(raw: c_int) -> DriverResult<()> {
    ErrorCode::check(raw).map(|_| ())
}

struct ContextPtr(*mut nfc_context);

// SAFETY: libnfc contexts are only touched under the owning `Context` lock;
// device handles keep the context alive and never use it directly.
unsafe impl Send for ContextPtr {}
unsafe impl Sync for ContextPtr {}

impl Drop for ContextPtr {
    fn drop(&mut self) {
        log::debug!("releasing libnfc context");
        unsafe { nfc_exit(self.0) };
    }
}

/// libnfc driver context.
pub struct LibnfcDriver {
    context: Arc<ContextPtr>,
}

impl LibnfcDriver {
    /// Initialise a libnfc context.
    pub fn init() -> Result<Self> {
        let mut ctx: *mut nfc_context = ptr::null_mut();
        unsafe { nfc_init(&mut ctx) };
        if ctx.is_null() {
            return Err(Error::Software("unable to initialise libnfc".to_string()));
        }
        log::debug!("libnfc {} initialised", Self::library_version());
        Ok(Self {
            context: Arc::new(ContextPtr(ctx)),
        })
    }

    fn library_version() -> String {
        unsafe { owned_string(nfc_version()) }
    }
}

impl Driver for LibnfcDriver {
    fn enumerate(&mut self, max: usize) -> DriverResult<Vec<String>> {
        let mut buf: Vec<nfc_connstring> = vec![[0; BUFSIZE_CONNSTRING]; max];
        let n = unsafe { nfc_list_devices(self.context.0, buf.as_mut_ptr(), max) };
        Ok(buf
            .iter()
            .take(n.min(max))
            .map(|c| unsafe { owned_string(c.as_ptr()) })
            .collect())
    }

    fn open(&mut self, connstring: Option<&str>) -> DriverResult<Box<dyn DriverHandle>> {
        let wanted = match connstring {
            Some(s) if s.len() <= MAX_CONNSTRING_LEN => {
                Some(CString::new(s).map_err(|_| ErrorCode::InvalidArgument)?)
            }
            Some(_) => return Err(ErrorCode::InvalidArgument),
            None => None,
        };
        let dev = unsafe {
            nfc_open(
                self.context.0,
                wanted.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
            )
        };
        if dev.is_null() {
            return Err(ErrorCode::NoSuchDevice);
        }
        Ok(Box::new(LibnfcHandle {
            dev,
            abort: Arc::new(LibnfcAbort {
                dev: Mutex::new(Some(DevicePtr(dev))),
            }),
            _context: Arc::clone(&self.context),
        }))
    }

    fn format_target(&self, target: &WireTarget, verbose: bool) -> DriverResult<String> {
        let mut buf: *mut c_char = ptr::null_mut();
        let rc = unsafe { str_nfc_target(&mut buf, target.as_ptr(), verbose) };
        let text = unsafe { take_string(buf) };
        status(rc)?;
        Ok(text)
    }

    fn version(&self) -> String {
        Self::library_version()
    }
}

#[derive(Clone, Copy)]
struct DevicePtr(*mut nfc_device);

// SAFETY: nfc_abort_command is the one libnfc call meant to be issued from a
// thread other than the one driving the device.
unsafe impl Send for DevicePtr {}

struct LibnfcAbort {
    dev: Mutex<Option<DevicePtr>>,
}

impl AbortSignal for LibnfcAbort {
    fn abort(&self) -> DriverResult<()> {
        let guard = self.dev.lock().unwrap_or_else(PoisonError::into_inner);
        match *guard {
            Some(dev) => status(unsafe { nfc_abort_command(dev.0) }),
            None => Ok(()),
        }
    }
}

struct LibnfcHandle {
    dev: *mut nfc_device,
    abort: Arc<LibnfcAbort>,
    _context: Arc<ContextPtr>,
}

// SAFETY: the device pointer is used by one owner at a time (`&mut self`);
// cross-thread access goes through `LibnfcAbort`.
unsafe impl Send for LibnfcHandle {}

impl DriverHandle for LibnfcHandle {
    fn close(&mut self) {
        // Stop aborts from racing with nfc_close.
        self.abort
            .dev
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        unsafe { nfc_close(self.dev) };
        self.dev = ptr::null_mut();
    }

    fn name(&self) -> String {
        unsafe { owned_string(nfc_device_get_name(self.dev)) }
    }

    fn connstring(&self) -> String {
        unsafe { owned_string(nfc_device_get_connstring(self.dev)) }
    }

    fn information(&mut self) -> DriverResult<String> {
        let mut buf: *mut c_char = ptr::null_mut();
        let rc = unsafe { nfc_device_get_information_about(self.dev, &mut buf) };
        let text = unsafe { take_string(buf) };
        status(rc)?;
        Ok(text)
    }

    fn last_error(&self) -> ErrorCode {
        ErrorCode::from_raw(unsafe { nfc_device_get_last_error(self.dev) })
    }

    fn set_property_int(&mut self, property: Property, value: i32) -> DriverResult<()> {
        status(unsafe { nfc_device_set_property_int(self.dev, property.as_raw(), value) })
    }

    fn set_property_bool(&mut self, property: Property, enable: bool) -> DriverResult<()> {
        status(unsafe { nfc_device_set_property_bool(self.dev, property.as_raw(), enable) })
    }

    fn supported_modulations(&mut self, mode: Mode) -> DriverResult<Vec<ModulationKind>> {
        let mut list: *const c_int = ptr::null();
        status(unsafe { nfc_device_get_supported_modulation(self.dev, mode.as_raw(), &mut list) })?;
        let raw = unsafe { zero_terminated(list) };
        Ok(raw.into_iter().filter_map(ModulationKind::from_raw).collect())
    }

    fn supported_baud_rates(&mut self, kind: ModulationKind) -> DriverResult<Vec<BaudRate>> {
        let mut list: *const c_int = ptr::null();
        status(unsafe { nfc_device_get_supported_baud_rate(self.dev, kind.as_raw(), &mut list) })?;
        let raw = unsafe { zero_terminated(list) };
        Ok(raw.into_iter().filter_map(BaudRate::from_raw).collect())
    }

    fn idle(&mut self) -> DriverResult<()> {
        status(unsafe { nfc_idle(self.dev) })
    }

    fn abort_signal(&self) -> Arc<dyn AbortSignal> {
        self.abort.clone()
    }

    fn initiator_init(&mut self) -> DriverResult<()> {
        status(unsafe { nfc_initiator_init(self.dev) })
    }

    fn initiator_init_secure_element(&mut self) -> DriverResult<()> {
        status(unsafe { nfc_initiator_init_secure_element(self.dev) })
    }

    fn initiator_select_passive_target(
        &mut self,
        modulation: Modulation,
        init_data: &[u8],
        target: &mut WireTarget,
    ) -> DriverResult<usize> {
        let init = if init_data.is_empty() {
            ptr::null()
        } else {
            init_data.as_ptr()
        };
        ErrorCode::check(unsafe {
            nfc_initiator_select_passive_target(
                self.dev,
                modulation.into(),
                init,
                init_data.len(),
                target.as_mut_ptr(),
            )
        })
    }

    fn initiator_list_passive_targets(
        &mut self,
        modulation: Modulation,
        targets: &mut [WireTarget],
    ) -> DriverResult<usize> {
        // WireTarget is a bare byte array, so a slice of them is the packed
        // nfc_target array libnfc expects.
        ErrorCode::check(unsafe {
            nfc_initiator_list_passive_targets(
                self.dev,
                modulation.into(),
                targets.as_mut_ptr().cast(),
                targets.len(),
            )
        })
    }

    fn initiator_poll_target(
        &mut self,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
        target: &mut WireTarget,
    ) -> DriverResult<usize> {
        let raw: Vec<NfcModulation> = modulations.iter().map(|&m| m.into()).collect();
        ErrorCode::check(unsafe {
            nfc_initiator_poll_target(
                self.dev,
                raw.as_ptr(),
                raw.len(),
                poll_nr,
                period,
                target.as_mut_ptr(),
            )
        })
    }

    fn initiator_select_dep_target(
        &mut self,
        mode: DepMode,
        baud_rate: BaudRate,
        initiator: Option<&WireTarget>,
        target: &mut WireTarget,
        timeout: i32,
    ) -> DriverResult<usize> {
        // nfc_dep_info sits at the start of the union.
        let local = initiator.map_or(ptr::null(), |w| w.as_ptr());
        ErrorCode::check(unsafe {
            nfc_initiator_select_dep_target(
                self.dev,
                mode.as_raw(),
                baud_rate.as_raw(),
                local,
                target.as_mut_ptr(),
                timeout,
            )
        })
    }

    fn initiator_deselect_target(&mut self) -> DriverResult<()> {
        status(unsafe { nfc_initiator_deselect_target(self.dev) })
    }

    fn initiator_target_is_present(&mut self, target: Option<&WireTarget>) -> DriverResult<()> {
        let pnt = target.map_or(ptr::null(), |w| w.as_ptr());
        status(unsafe { nfc_initiator_target_is_present(self.dev, pnt) })
    }

    fn initiator_transceive_bytes(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_initiator_transceive_bytes(
                self.dev,
                tx.as_ptr(),
                tx.len(),
                rx.as_mut_ptr(),
                rx.len(),
                timeout,
            )
        })
    }

    fn initiator_transceive_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
        rx: &mut [u8],
        rx_parity: &mut [u8],
    ) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_initiator_transceive_bits(
                self.dev,
                tx.as_ptr(),
                tx_bits,
                tx_parity.as_ptr(),
                rx.as_mut_ptr(),
                rx.len(),
                rx_parity.as_mut_ptr(),
            )
        })
    }

    fn initiator_transceive_bytes_timed(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        cycles: &mut u32,
    ) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_initiator_transceive_bytes_timed(
                self.dev,
                tx.as_ptr(),
                tx.len(),
                rx.as_mut_ptr(),
                rx.len(),
                cycles,
            )
        })
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
        ErrorCode::check(unsafe {
            nfc_initiator_transceive_bits_timed(
                self.dev,
                tx.as_ptr(),
                tx_bits,
                tx_parity.as_ptr(),
                rx.as_mut_ptr(),
                rx.len(),
                rx_parity.as_mut_ptr(),
                cycles,
            )
        })
    }

    fn target_init(
        &mut self,
        target: &mut WireTarget,
        rx: &mut [u8],
        timeout: i32,
    ) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_target_init(
                self.dev,
                target.as_mut_ptr(),
                rx.as_mut_ptr(),
                rx.len(),
                timeout,
            )
        })
    }

    fn target_send_bytes(&mut self, tx: &[u8], timeout: i32) -> DriverResult<usize> {
        ErrorCode::check(unsafe { nfc_target_send_bytes(self.dev, tx.as_ptr(), tx.len(), timeout) })
    }

    fn target_receive_bytes(&mut self, rx: &mut [u8], timeout: i32) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_target_receive_bytes(self.dev, rx.as_mut_ptr(), rx.len(), timeout)
        })
    }

    fn target_send_bits(
        &mut self,
        tx: &[u8],
        tx_bits: usize,
        tx_parity: &[u8],
    ) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_target_send_bits(self.dev, tx.as_ptr(), tx_bits, tx_parity.as_ptr())
        })
    }

    fn target_receive_bits(&mut self, rx: &mut [u8], rx_parity: &mut [u8]) -> DriverResult<usize> {
        ErrorCode::check(unsafe {
            nfc_target_receive_bits(self.dev, rx.as_mut_ptr(), rx.len(), rx_parity.as_mut_ptr())
        })
    }
}
