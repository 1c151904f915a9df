pub mod local;
pub mod memory;
pub mod password;

pub(crate) const INVALID_LOGIN: &str = "Invalid login credentials";
pub(crate) const ALREADY_REGISTERED: &str = "User already registered";
