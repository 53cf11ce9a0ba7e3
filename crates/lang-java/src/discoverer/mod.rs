//! Locating artifact archives on the local machine.

pub mod maven;
