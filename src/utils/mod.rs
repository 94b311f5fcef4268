pub mod temp;
pub mod validation;
