pub(crate) mod layout;
pub(crate) mod pdf;
pub(crate) mod render;
