#[macro_use]
mod common;

mod printing;
