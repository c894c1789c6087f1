pub(crate) mod alloc;

pub(crate) mod utils;

pub(crate) use self::alloc::{Global, RawHandle};
