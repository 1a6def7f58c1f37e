use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the stderr subscriber once.
///
/// Filter directives come from `EDO_LOG` (for example
/// `EDO_LOG=edo_model=debug,edo_clean=warn`); the fallback is `edo=info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("EDO_LOG").unwrap_or_else(|_| EnvFilter::new("edo=info"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
