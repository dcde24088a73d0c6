// pn53x-rs/pn53x/src/device/abort.rs

//! Cross-thread cancellation of blocking device calls.

use std::fmt;
use std::sync::Arc;

use crate::driver::AbortSignal;
use crate::Result;

/// Cancels a blocking call on a [`Device`](crate::device::Device) from
/// another thread. The interrupted call fails with
/// [`Error::Aborted`](crate::Error::Aborted).
#[derive(Clone)]
pub struct AbortHandle {
    signal: Arc<dyn AbortSignal>,
}

impl AbortHandle {
    pub(crate) fn new(signal: Arc<dyn AbortSignal>) -> Self {
        Self { signal }
    }

    /// Signal the pending call to stop.
    pub fn abort(&self) -> Result<()> {
        log::debug!("aborting pending command");
        self.signal.abort()?;
        Ok(())
    }
}

impl fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Driver, MockDevice, MockDriver};

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AbortHandle>();
    }

    #[test]
    fn abort_reaches_driver() {
        let dev = MockDevice::new("mock", "mock:0");
        let handle = MockDriver::new().with_device(dev.clone()).open(None).unwrap();
        let abort = AbortHandle::new(handle.abort_signal());
        abort.clone().abort().unwrap();
        assert!(dev.state().aborted);
        assert!(dev.calls().contains(&"abort_command".to_string()));
    }
}
