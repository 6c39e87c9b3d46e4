pub mod delete;
pub mod import;
pub mod init;
pub mod list;
pub mod run;
