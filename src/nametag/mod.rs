pub(crate) mod attendee;
pub(crate) mod layout;
pub(crate) mod render;
