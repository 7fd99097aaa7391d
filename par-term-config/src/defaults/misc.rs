//! Default values for caching and diagnostics settings.

pub fn shape_cache_size() -> usize {
    1000 // Shaped strings kept in the LRU cache
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Off
}
