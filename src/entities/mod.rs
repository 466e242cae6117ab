//! Domain records of the cupboard

pub mod basket;
pub mod email;
pub mod macros;
pub mod toy;
pub mod user;

pub use basket::FundBasket;
pub use email::EmailRequest;
pub use toy::Toy;
pub use user::User;
