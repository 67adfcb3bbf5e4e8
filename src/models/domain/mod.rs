pub mod question;
pub mod score;
pub mod user;
pub use question::Question;
pub use score::Score;
pub use user::{Identity, User};
