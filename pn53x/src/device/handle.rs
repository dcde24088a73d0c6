// pn53x-rs/pn53x/src/device/handle.rs

//! Opened reader handle: configuration, target selection and emulation setup.

use crate::constants::LIST_CHUNK;
use crate::device::abort::AbortHandle;
use crate::driver::{DriverHandle, DriverResult};
use crate::error::ErrorCode;
use crate::protocol::wire::WireTarget;
use crate::target::{DepTarget, Target};
use crate::types::{BaudRate, DepMode, Mode, Modulation, ModulationKind, Property};
use crate::utils::Timeout;
use crate::{Error, Result};

/// An opened reader.
///
/// Every operation fails with [`Error::DeviceClosed`] once [`Device::close`]
/// has run; dropping an open device closes it.
pub struct Device {
    pub(crate) handle: Option<Box<dyn DriverHandle>>,
    abort: AbortHandle,
}

impl Device {
    /// Wrap a driver handle. Mostly useful together with a custom
    /// [`Driver`](crate::driver::Driver).
    pub fn from_handle(handle: Box<dyn DriverHandle>) -> Self {
        log::debug!("opened {} ({})", handle.name(), handle.connstring());
        let abort = AbortHandle::new(handle.abort_signal());
        Self {
            handle: Some(handle),
            abort,
        }
    }

    /// Run a driver call, mapping its status into [`Error`].
    pub(crate) fn with_handle<T>(
        &mut self,
        op: &str,
        f: impl FnOnce(&mut dyn DriverHandle) -> DriverResult<T>,
    ) -> Result<T> {
        let handle = self.handle.as_deref_mut().ok_or(Error::DeviceClosed)?;
        f(handle).map_err(|code| {
            log::debug!("{} failed: {}", op, code);
            Error::from(code)
        })
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.handle.is_none() {
            return Err(Error::DeviceClosed);
        }
        Ok(())
    }

    /// Close the reader. Closing twice is fine.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            log::debug!("closing {}", handle.connstring());
            handle.close();
        }
    }

    /// Whether [`Device::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    /// Reader name, empty once closed.
    pub fn name(&self) -> String {
        self.handle.as_ref().map(|h| h.name()).unwrap_or_default()
    }

    /// Connection string, empty once closed.
    pub fn connection(&self) -> String {
        self.handle
            .as_ref()
            .map(|h| h.connstring())
            .unwrap_or_default()
    }

    /// Multi-line description of the reader and its chip.
    pub fn information(&mut self) -> Result<String> {
        self.with_handle("information", |h| h.information())
    }

    /// Status the driver recorded for the last failed operation.
    pub fn last_error(&self) -> Result<ErrorCode> {
        let handle = self.handle.as_ref().ok_or(Error::DeviceClosed)?;
        Ok(handle.last_error())
    }

    /// Set one of the integer (timeout) properties.
    pub fn set_property_int(&mut self, property: Property, value: i32) -> Result<()> {
        self.ensure_open()?;
        if !property.is_integer() {
            return Err(Error::invalid(format!("{:?} is a boolean property", property)));
        }
        log::debug!("set {:?} = {}", property, value);
        self.with_handle("set_property_int", |h| h.set_property_int(property, value))
    }

    /// Set one of the boolean properties.
    pub fn set_property_bool(&mut self, property: Property, enable: bool) -> Result<()> {
        self.ensure_open()?;
        if property.is_integer() {
            return Err(Error::invalid(format!("{:?} is an integer property", property)));
        }
        log::debug!("set {:?} = {}", property, enable);
        self.with_handle("set_property_bool", |h| h.set_property_bool(property, enable))
    }

    /// Modulation kinds available in `mode`.
    pub fn supported_modulations(&mut self, mode: Mode) -> Result<Vec<ModulationKind>> {
        self.with_handle("supported_modulations", |h| h.supported_modulations(mode))
    }

    /// Bit rates available for `kind`.
    pub fn supported_baud_rates(&mut self, kind: ModulationKind) -> Result<Vec<BaudRate>> {
        self.with_handle("supported_baud_rates", |h| h.supported_baud_rates(kind))
    }

    /// Switch the field off and put the chip to sleep.
    pub fn idle(&mut self) -> Result<()> {
        self.with_handle("idle", |h| h.idle())
    }

    /// Abort the command currently running on this device.
    pub fn abort_command(&self) -> Result<()> {
        self.ensure_open()?;
        self.abort.abort()
    }

    /// Handle that can abort commands from another thread.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Configure the reader as initiator.
    pub fn initiator_init(&mut self) -> Result<()> {
        log::debug!("initiator mode");
        self.with_handle("initiator_init", |h| h.initiator_init())
    }

    /// Initiator mode towards the embedded secure element.
    pub fn initiator_init_secure_element(&mut self) -> Result<()> {
        self.with_handle("initiator_init_secure_element", |h| {
            h.initiator_init_secure_element()
        })
    }

    /// Select a passive target; `None` when nothing answered.
    ///
    /// `init_data` depends on the modulation: a UID for ISO14443A, the AFI
    /// for ISO14443B, a polling payload for FeliCa.
    pub fn initiator_select_passive_target(
        &mut self,
        modulation: Modulation,
        init_data: Option<&[u8]>,
    ) -> Result<Option<Target>> {
        let mut wire = WireTarget::zeroed();
        let found = self.with_handle("initiator_select_passive_target", |h| {
            h.initiator_select_passive_target(modulation, init_data.unwrap_or(&[]), &mut wire)
        })?;
        Ok((found > 0).then(|| Target::decode(&wire)))
    }

    /// Every passive target of `modulation` in the field.
    pub fn initiator_list_passive_targets(&mut self, modulation: Modulation) -> Result<Vec<Target>> {
        let mut slots = LIST_CHUNK;
        loop {
            let mut buf = vec![WireTarget::zeroed(); slots];
            let n = self.with_handle("initiator_list_passive_targets", |h| {
                h.initiator_list_passive_targets(modulation, &mut buf)
            })?;
            if n < slots {
                log::debug!("{} {} target(s) in the field", n, modulation);
                return Ok(buf[..n].iter().map(Target::decode).collect());
            }
            // The driver filled every slot; there may be more.
            slots += LIST_CHUNK;
        }
    }

    /// Poll for any of `modulations`, `poll_nr` rounds of `period` x 150 ms.
    pub fn initiator_poll_target(
        &mut self,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
    ) -> Result<Option<Target>> {
        self.ensure_open()?;
        if modulations.is_empty() {
            return Err(Error::invalid("no modulation to poll for"));
        }
        let mut wire = WireTarget::zeroed();
        let found = self.with_handle("initiator_poll_target", |h| {
            h.initiator_poll_target(modulations, poll_nr, period, &mut wire)
        })?;
        Ok((found > 0).then(|| Target::decode(&wire)))
    }

    /// Activate an NFC-DEP peer. `initiator` carries our own NFCID3 and
    /// general bytes.
    pub fn initiator_select_dep_target(
        &mut self,
        mode: DepMode,
        baud_rate: BaudRate,
        initiator: Option<&DepTarget>,
        timeout: Timeout,
    ) -> Result<Option<Target>> {
        self.ensure_open()?;
        let local = match initiator {
            Some(info) => Some(Target::Dep(info.clone()).encode()?),
            None => None,
        };
        let mut wire = WireTarget::zeroed();
        let found = self.with_handle("initiator_select_dep_target", |h| {
            h.initiator_select_dep_target(
                mode,
                baud_rate,
                local.as_ref(),
                &mut wire,
                timeout.as_raw(),
            )
        })?;
        Ok((found > 0).then(|| Target::decode(&wire)))
    }

    /// Release the selected target.
    pub fn initiator_deselect_target(&mut self) -> Result<()> {
        self.with_handle("initiator_deselect_target", |h| h.initiator_deselect_target())
    }

    /// `Ok` while `target` (or the selected target, for `None`) is still in
    /// the field; [`Error::TargetReleased`] once it is gone.
    pub fn initiator_target_is_present(&mut self, target: Option<&Target>) -> Result<()> {
        self.ensure_open()?;
        let wire = target.map(Target::encode).transpose()?;
        self.with_handle("initiator_target_is_present", |h| {
            h.initiator_target_is_present(wire.as_ref())
        })
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("connection", &self.connection())
            .field("closed", &self.is_closed())
            .finish()
    }
}
