//! Business logic services

pub mod auth_service;
pub mod workshop_service;

pub use auth_service::AuthService;
pub use workshop_service::WorkshopService;
