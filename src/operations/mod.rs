pub mod companion;
pub mod mapping;
pub mod naming;
pub mod rename;
