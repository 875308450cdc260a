//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod assignment;
pub mod user;
pub mod workshop;

pub use assignment::*;
pub use user::*;
pub use workshop::*;
