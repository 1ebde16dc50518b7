//! The `utils` module collects pieces shared by the library and the `eaip`
//! binary: the application error type and logging setup.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
        logging::init("no-such-level");
    }

    #[test]
    fn level_mapping() {
        assert_eq!(logging::level("ERROR"), tracing::Level::ERROR);
        assert_eq!(logging::level("warning"), tracing::Level::WARN);
        assert_eq!(logging::level("trace"), tracing::Level::TRACE);
        assert_eq!(logging::level(""), tracing::Level::INFO);
    }
}
