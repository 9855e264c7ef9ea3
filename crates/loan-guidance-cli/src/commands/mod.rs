pub mod amortization;
pub mod guidance;
