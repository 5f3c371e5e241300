pub mod cookies;
pub mod key_value;
