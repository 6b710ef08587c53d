//! Bearer-token accessor for the identity provider's access tokens.

pub mod jwt;
