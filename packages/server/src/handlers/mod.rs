pub mod health;
pub mod inspection;
