/// Result of attempting to create a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Created,
    /// Another writer already holds this external subject id. Nothing was
    /// written; the caller should re-read the winner's row.
    Conflict,
}
