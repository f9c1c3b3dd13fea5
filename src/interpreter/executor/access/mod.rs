//! Index access.

mod index;
