
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the test logger. Safe to call from every test.
///
/// Engine logs are shown at debug level unless `RUST_LOG` says otherwise.
pub fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{:<5} {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .filter_level(LevelFilter::Debug)
            .parse_default_env()
            .is_test(true)
            .init();
    });
}
