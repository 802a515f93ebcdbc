/// Collision-free filename generation
use crate::constants::MAX_FILENAME_PROBES;
use crate::error::FilegateError;

/// Splits `name` at its last dot; the extension keeps the dot
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Returns `name` if unused, otherwise the first free `stem-N.ext` (N from 1)
///
/// `exists` answers whether a name is already taken in the target location.
/// Probing is not atomic with the later write; two concurrent uploads of the
/// same name may pick the same candidate.
pub fn generate_unique_filename<F>(name: &str, exists: F) -> Result<String, FilegateError>
where
    F: Fn(&str) -> bool,
{
    if !exists(name) {
        return Ok(name.to_string());
    }

    let (stem, extension) = split_name(name);
    (1..=MAX_FILENAME_PROBES)
        .map(|counter| format!("{}-{}{}", stem, counter, extension))
        .find(|candidate| !exists(candidate))
        .ok_or_else(|| {
            FilegateError::NamespaceExhausted(format!(
                "no free name for '{}' after {} attempts",
                name, MAX_FILENAME_PROBES
            ))
        })
}
