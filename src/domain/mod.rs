pub mod entities;
pub mod ownership;
pub mod password;
pub mod search;
pub mod use_cases;
