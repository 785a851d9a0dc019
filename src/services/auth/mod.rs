pub mod client;
pub mod token_cache;

pub use client::{AuthClient, AuthError, ClientCredentials, TwitchAuthClient};
pub use token_cache::{AccessToken, TokenCache};
