/// Calculate n! without overflow, saturating at `u64::MAX`
pub fn factorial(n: usize) -> u64 {
    (2..=n as u64).fold(1u64, |acc, k| acc.saturating_mul(k))
}

/// Render a matrix one row per line with a fixed indent
pub fn format_matrix(rows: &[Vec<u64>], indent: usize) -> String {
    let pad = " ".repeat(indent);
    rows.iter()
        .map(|row| format!("{}{:?}\n", pad, row))
        .collect()
}

/// Install `env_logger` for the binaries; `RUST_LOG` overrides the `-v` count
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
