// helpers.rs: mock wiring shared by the device tests

use pn53x::driver::{MockDevice, MockDriver};
use pn53x::prelude::*;

pub use pn53x::test_support::{mock_context, open_mock_device, sample_targets};

pub const A106: Modulation = Modulation::new(ModulationKind::Iso14443a, BaudRate::Br106);

/// Route library logs to the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Context with `n` mock readers named `mock:0`, `mock:1`, ...
pub fn context_with_readers(n: usize) -> (Context, Vec<MockDevice>) {
    let readers: Vec<MockDevice> = (0..n)
        .map(|i| MockDevice::new(format!("mock reader {}", i), format!("mock:{}", i)))
        .collect();
    (mock_context(&readers), readers)
}

/// Driver factory for contexts that should initialise lazily.
pub fn lazy_context(readers: Vec<MockDevice>) -> Context {
    Context::new(move || {
        let mut driver = MockDriver::new();
        for r in &readers {
            driver.add_device(r.clone());
        }
        Ok(Box::new(driver) as Box<dyn pn53x::driver::Driver>)
    })
}
