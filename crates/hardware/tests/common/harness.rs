use tracing_subscriber::EnvFilter;
use xorsim_core::XorTest;
use xorsim_core::config::XorTestConfig;

/// Installs a test-writer subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `debug` so traced register accesses show
/// up in failing test output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Builds an XOR test device at the default base address, fresh from reset.
pub fn xor_test() -> XorTest {
    XorTest::new(&XorTestConfig::default(), false).expect("xor-test register table is valid")
}

/// Builds an XOR test device at `base_addr` with access tracing enabled.
pub fn traced_xor_test(base_addr: u64) -> XorTest {
    let config = XorTestConfig {
        base_addr,
        ..XorTestConfig::default()
    };
    XorTest::new(&config, true).expect("xor-test register table is valid")
}
