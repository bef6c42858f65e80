pub mod birthdays;
pub mod client_code;
