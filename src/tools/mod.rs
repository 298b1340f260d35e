pub mod calculator;
pub mod shell;

pub use calculator::{CalculationResult, CalculatorRequest};
pub use shell::{ShellOutcome, ShellRequest};
