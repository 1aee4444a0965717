pub mod jwt;
pub mod multipart;
pub mod password;
