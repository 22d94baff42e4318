/// Errors raised by the configuration surface.
///
/// Controllers themselves never fail; these cover parsing and validating options supplied by the
/// app (theme names, densities, reveal speeds).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown theme mode `{0}` (expected `light` or `dark`)")]
    UnknownThemeMode(String),

    #[error("unknown density `{0}` (expected `compact`, `comfortable` or `spacious`)")]
    UnknownDensity(String),

    #[error("unknown reveal speed `{0}` (expected `slow`, `normal`, `fast` or milliseconds)")]
    UnknownSpeed(String),

    #[error("reveal delay must be at least 1ms")]
    ZeroDelay,
}

pub type Result<T> = std::result::Result<T, Error>;
