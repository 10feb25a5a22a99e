//! Credential material classification.

use std::path::Path;

/// Split `keys` into paths of existing regular files and inline key
/// material. Both halves keep the input order.
pub fn group_keys_and_keyfiles(keys: Vec<String>) -> (Vec<String>, Vec<String>) {
    let (files, inline): (Vec<_>, Vec<_>) = keys.into_iter().partition(|key| {
        let is_file = Path::new(key).is_file();
        tracing::trace!("key {} a file on disk", if is_file { "is" } else { "is not" });
        is_file
    });
    (inline, files)
}
