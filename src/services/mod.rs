//! Business rules on top of the file stores

pub mod basket;
pub mod cupboard;
pub mod email;
pub mod user;

pub use basket::BasketService;
pub use cupboard::CupboardService;
pub use email::{EmailService, Mailer, SmtpMailer};
pub use user::UserService;
