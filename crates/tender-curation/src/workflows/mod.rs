pub mod evaluation;
pub mod intake;
