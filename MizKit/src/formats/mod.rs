//! File formats carried inside a mission archive

pub mod lua;
pub mod miz;
