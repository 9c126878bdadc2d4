pub mod codec;
pub mod command;
pub mod cutscene;
pub mod enums;
pub mod error;
pub mod host;
pub mod parser;
pub mod schema;
pub mod spline;
