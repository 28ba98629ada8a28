pub mod dashboard;
pub mod init;
pub mod lookup;
pub mod pages;
pub mod projects;
