/// Issues notification ids.
///
/// Implementations must never hand out the same id twice for the lifetime of
/// the process. The encoding is otherwise free.
pub trait IdSource: Send {
    fn next_id(&mut self) -> String;
}
