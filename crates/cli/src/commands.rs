pub mod help;
pub mod init;
pub mod plan;
pub mod run;
pub mod schema;
