use env_logger::Env;

/// Installs the global logger. `RUST_LOG` overrides the default `info` filter.
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    if env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialised");
    }
}
