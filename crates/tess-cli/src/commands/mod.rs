pub mod audit;
pub mod dispatch;
pub mod report;
pub mod schema;
pub mod whoami;
