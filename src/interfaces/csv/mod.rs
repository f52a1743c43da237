pub mod debt_reader;
pub mod plan_writer;
