pub mod commands;
pub mod dates;
pub mod document;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod slug;
pub mod store;
pub mod ticket_id;
