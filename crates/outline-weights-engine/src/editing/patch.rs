/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges touched by the edit, in post-edit coordinates. A pure
    /// deletion shows up as an empty range where the text used to be.
    pub changed: Vec<std::ops::Range<usize>>,
    pub new_point: usize,
    pub version: u64,
}
