pub mod publish;
pub mod run;
pub mod schema;
