use anyhow::Error;
use log::error;

/// Log the whole context chain of `error` once, then hand it back to the caller.
pub fn handle_error(error: Error) -> Error {
    let mut message = format!("{}", error);
    for cause in error.chain().skip(1) {
        message.push_str(&format!("\n  caused by: {}", cause));
    }
    error!("{}", message);
    error
}
