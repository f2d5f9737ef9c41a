//! Built-in rule policies.
//!
//! These are example policies layered on top of the engine, not part of it:
//! each is an ordinary [`TextValidator`](crate::validator::TextValidator)
//! whose four flags describe when it runs and what a rejection means.

pub mod charset;
pub mod email;
pub mod length;
pub mod numeric;
pub mod password;

pub use charset::CharacterRule;
pub use email::Email;
pub use length::{MaxLength, MinLength, NotEmpty};
pub use numeric::{Decimal, PositiveNumber, RelativeNumber};
pub use password::Password;
