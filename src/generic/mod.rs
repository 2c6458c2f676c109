//! Generic structures, used by but not specific to the library.

pub mod index_heap;
pub mod luby;
pub mod random;
