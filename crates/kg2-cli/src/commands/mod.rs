pub mod demo;
pub mod dispatch;
pub mod fetch;
pub mod pack;
pub mod query;
pub mod report;
pub mod tables;
