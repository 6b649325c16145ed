//! Flutter-facing FFI crate for Awolan.
//! All exported functions live in `api`; nothing else is public.

pub mod api;
