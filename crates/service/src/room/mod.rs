//! Room module: domain types, validator, repository contract and service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod validator;

pub use repository::RoomRepository;
pub use service::RoomService;
pub use validator::RoomValidator;
