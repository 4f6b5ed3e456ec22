pub mod bytecode;
pub mod replicate;
pub mod runtime;
