// pn53x-rs/pn53x/src/device/context.rs

//! Driver context lifecycle.
//!
//! A [`Context`] owns one driver behind a single lock. The driver is created
//! lazily by the first operation that needs it; a failed creation leaves the
//! context uninitialised so a later call can retry. [`Context::deinit`] is
//! final.

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::constants::{LIST_CHUNK, MAX_CONNSTRING_LEN};
use crate::device::handle::Device;
use crate::driver::Driver;
use crate::target::Target;
use crate::{Error, Result};

/// Creates the driver on first use.
pub type DriverFactory = Box<dyn Fn() -> Result<Box<dyn Driver>> + Send + Sync>;

enum State {
    Uninitialized,
    Initialized(Box<dyn Driver>),
    Deinitialized,
}

/// Lazily initialised driver context.
pub struct Context {
    factory: DriverFactory,
    state: Mutex<State>,
}

impl Context {
    /// Context that builds its driver with `factory` on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Driver>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            state: Mutex::new(State::Uninitialized),
        }
    }

    /// Context around an already constructed driver.
    pub fn with_driver<D: Driver + 'static>(driver: D) -> Self {
        Self {
            factory: Box::new(|| Err(Error::Software("driver already supplied".to_string()))),
            state: Mutex::new(State::Initialized(Box::new(driver))),
        }
    }

    /// Run `f` against the driver, initialising it first if needed.
    fn with_driver_locked<T>(&self, f: impl FnOnce(&mut dyn Driver) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &mut *state {
            State::Initialized(driver) => return f(driver.as_mut()),
            State::Deinitialized => {
                return Err(Error::Software("context deinitialized".to_string()));
            }
            State::Uninitialized => {}
        }
        log::debug!("initialising driver context");
        let mut driver = (self.factory)().inspect_err(|e| {
            log::warn!("driver context initialisation failed: {}", e);
        })?;
        let out = f(driver.as_mut());
        *state = State::Initialized(driver);
        out
    }

    /// Initialise now instead of on first use. Idempotent.
    pub fn init(&self) -> Result<()> {
        self.with_driver_locked(|_| Ok(()))
    }

    /// Whether a driver is currently held.
    pub fn is_initialized(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*state, State::Initialized(_))
    }

    /// Tear the driver down. Later operations fail.
    pub fn deinit(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, State::Initialized(_)) {
            log::debug!("releasing driver context");
        }
        *state = State::Deinitialized;
    }

    /// Connection strings of every attached reader.
    pub fn list_devices(&self) -> Result<Vec<String>> {
        self.with_driver_locked(|driver| {
            let mut slots = LIST_CHUNK;
            loop {
                let found = driver.enumerate(slots)?;
                if found.len() < slots {
                    log::debug!("{} reader(s) attached", found.len());
                    return Ok(found);
                }
                slots += LIST_CHUNK;
            }
        })
    }

    /// Open a reader by connection string; `""` opens the first one.
    pub fn open(&self, connstring: &str) -> Result<Device> {
        if connstring.len() > MAX_CONNSTRING_LEN {
            return Err(Error::invalid(format!(
                "connection string is {} bytes, at most {} allowed",
                connstring.len(),
                MAX_CONNSTRING_LEN
            )));
        }
        if connstring.contains('\0') {
            return Err(Error::invalid("connection string contains NUL"));
        }
        let wanted = (!connstring.is_empty()).then_some(connstring);
        let handle = self.with_driver_locked(|driver| Ok(driver.open(wanted)?))?;
        Ok(Device::from_handle(handle))
    }

    /// Render `target` with the driver's formatter.
    pub fn render_target(&self, target: &Target, verbose: bool) -> Result<String> {
        self.with_driver_locked(|driver| target.render(&*driver, verbose))
    }

    /// Driver version string.
    pub fn version(&self) -> Result<String> {
        self.with_driver_locked(|driver| Ok(driver.version()))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(feature = "libnfc")]
fn default_driver() -> Result<Box<dyn Driver>> {
    Ok(Box::new(crate::driver::libnfc::LibnfcDriver::init()?))
}

#[cfg(not(feature = "libnfc"))]
fn default_driver() -> Result<Box<dyn Driver>> {
    Err(Error::NotImplemented)
}

static GLOBAL: OnceLock<Context> = OnceLock::new();

/// Process-wide context backed by libnfc (with the `libnfc` feature).
pub fn global() -> &'static Context {
    GLOBAL.get_or_init(|| Context::new(default_driver))
}

/// Open a reader through the process-wide context.
pub fn open(connstring: &str) -> Result<Device> {
    global().open(connstring)
}

/// List readers through the process-wide context.
pub fn list_devices() -> Result<Vec<String>> {
    global().list_devices()
}

/// Version string of the process-wide driver.
pub fn version() -> Result<String> {
    global().version()
}
