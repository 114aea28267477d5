pub mod email;

pub use email::EmailAlerter;
