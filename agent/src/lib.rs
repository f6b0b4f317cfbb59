use env_logger::Env;

pub mod config;
pub mod display;

/// Initializes the global logger.
///
/// Call this first!
///
/// # Example
///
/// ```
/// use vigil_agent::init_logger;
///
/// /// Runs my own counter agent.
/// fn main() {
///     init_logger();
///     log::info!("I can log now!");
/// }
/// ```
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
