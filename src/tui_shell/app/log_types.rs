#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(super) struct ScrollEntry {
    pub(super) ts: String,
    pub(super) kind: EntryKind,
    pub(super) lines: Vec<String>,
}
