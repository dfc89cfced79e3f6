use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "climaqc",
    "climaqc_calendar",
    "climaqc_climatology",
    "climaqc_impute",
    "climaqc_io",
    "climaqc_outlier",
    "climaqc_pipeline",
    "climaqc_series",
    "climaqc_stats",
    "climaqc_summary",
];

/// Maps the `-v` count to a level name.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default filter directive covering every workspace crate.
fn default_directive(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing on stderr based on CLI verbosity.
///
/// `RUST_LOG` overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn directive_covers_every_crate() {
        let d = default_directive(1);
        assert!(d.starts_with("climaqc=info,"));
        assert_eq!(d.split(',').count(), CRATE_TARGETS.len());
        assert!(d.contains("climaqc_pipeline=info"));
    }
}
