pub mod prelude;

pub mod registration;
