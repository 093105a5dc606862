pub(crate) mod array;
pub(crate) mod float16;
