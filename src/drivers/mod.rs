//! Output shaping between operator requests and motor groups.

pub mod differential;
