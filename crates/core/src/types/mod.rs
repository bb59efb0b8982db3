//! Value types shared by the server, the client and the CLI.

pub mod category;
pub mod email;
pub mod id;
pub mod price;

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use email::{Email, EmailError};
pub use id::{AdminUserId, ParseIdError, ProductId};
pub use price::{Price, PriceError};
