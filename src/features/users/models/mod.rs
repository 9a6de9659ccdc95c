mod user;

pub use user::{CreateUser, UpdateProfile, UserAccount, UserProfile, UserWithProfile};
