pub(crate) mod ass;
pub(crate) mod srt;
pub(crate) mod timestamp;
