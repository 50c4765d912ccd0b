//! Built-in lints for blueprint validation.

mod database_password;
mod duplicate_id;
mod empty_blueprint;
mod isolated_service;
mod missing_port;
mod name_collision;
mod service_type;

pub use database_password::DatabasePasswordLint;
pub use duplicate_id::DuplicateIdLint;
pub use empty_blueprint::EmptyBlueprintLint;
pub use isolated_service::IsolatedServiceLint;
pub use missing_port::MissingPortLint;
pub use name_collision::NameCollisionLint;
pub use service_type::ServiceTypeLint;
