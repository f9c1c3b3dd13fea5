//! Array and hash literals.

mod arrays;
mod hashes;
