//! Tables read and written by the pass-all-assets pipeline.
//!
//! Table and column names follow the existing inspection schema
//! (PascalCase tables, camelCase columns).

pub mod asset;
pub mod asset_check;
pub mod check_group;
pub mod check_group_template;
pub mod check_item;
pub mod check_item_template;
pub mod location;
pub mod product;
