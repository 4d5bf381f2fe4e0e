pub mod lenders;
pub mod loan;
pub mod schedule;
