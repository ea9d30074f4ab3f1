//! User-Agent header sent with every request.

use std::sync::OnceLock;

const SDK_NAME: &str = "stargate-sdk";

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for SDK requests.
///
/// Format: `stargate-sdk/0.1.0 (rust/1.92; linux/x86_64)`
///
/// Computed once and cached.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
