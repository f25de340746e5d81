/// Field-level checks run on request bodies before any database call.
///
/// Implementations return the first failing constraint as a human readable
/// message, which handlers surface verbatim in the `message` field.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Runs a list of checks in order and stops at the first failure.
pub fn first_error<I>(checks: I) -> Result<(), String>
where
    I: IntoIterator<Item = Result<(), String>>,
{
    checks.into_iter().collect::<Result<Vec<()>, String>>().map(|_| ())
}
