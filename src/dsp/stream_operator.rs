use crate::prelude::ErrorsFirgen;

/// Common interface for block processors that consume a stream in chunks and keep state between chunks.

pub trait StreamOperatorManagement {
    /// Clears internal state so the next chunk starts a fresh stream.
    fn reset(&mut self) -> Result<(), ErrorsFirgen>;
}

pub trait StreamOperator<Input, Output>: StreamOperatorManagement {
    /// Processes one chunk. Returns `None` when the chunk produced no output.
    fn process(&mut self, data_in: &[Input]) -> Result<Option<Vec<Output>>, ErrorsFirgen>;
    /// Pushes the remaining filter state out by feeding silence.
    fn flush(&mut self) -> Result<Option<Vec<Output>>, ErrorsFirgen>;
}
