//! Common helpers shared by the formats, the outline walker and the TOC builder.

pub mod escape;
pub mod slug;
