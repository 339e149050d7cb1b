//! User command and query handlers.

mod get_user_reviews;
mod set_user_active;

pub use get_user_reviews::{GetUserReviewsHandler, GetUserReviewsQuery};
pub use set_user_active::{SetUserActiveCommand, SetUserActiveHandler};
