//! Identity provider adapters.

mod userinfo;

pub use userinfo::UserInfoIdentityProvider;
