use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,pixle=debug";

/// Install a global fmt subscriber, honouring `RUST_LOG` when present.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install a global fmt subscriber with an explicit filter directive.
///
/// Returns `false` if a global subscriber was already set (e.g. by another
/// test in the same process).
pub fn try_init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        try_init_with_filter("pixle=trace");
        assert!(!try_init_with_filter("pixle=trace"));
    }
}
