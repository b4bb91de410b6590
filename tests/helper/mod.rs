#![allow(dead_code)]

pub mod services;

pub use services::*;
