mod array;
mod float16;
