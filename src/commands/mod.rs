pub mod interest;
pub mod prevalence;
pub mod validate;
