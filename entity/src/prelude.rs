pub use super::registration::Entity as Registration;
