// ./src/lib.rs
pub mod debug;
pub mod export;
pub mod math;
