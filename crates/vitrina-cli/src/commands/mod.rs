pub mod create;
pub mod delete;
pub mod dispatch;
pub mod get;
pub mod list;
pub mod resources;
pub mod schema;
pub mod search;
pub mod shared;
pub mod shell;
pub mod update;
