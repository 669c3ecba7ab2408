mod common;
mod health;
mod pass_all_assets;
mod store;
