// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Utilities

/// Log a warning regarding an error message, including its source chain
pub fn warn_about_error(msg: &str, mut error: &dyn std::error::Error) {
    log::warn!(target: "sheen", "{msg}: {error}");
    while let Some(source) = error.source() {
        log::warn!(target: "sheen", "Source: {source}");
        error = source;
    }
}

/// Like [`warn_about_error`], passing through the result's value if `Ok`
pub fn warn_on_error<T, E: std::error::Error>(msg: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn_about_error(msg, &error);
            None
        }
    }
}
