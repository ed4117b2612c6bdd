pub mod password;
pub mod token;

pub use password::{hash_password, hash_password_blocking, verify_password, verify_password_blocking};
pub use token::{Claims, IssuedToken, TokenError, TokenIssuer};
