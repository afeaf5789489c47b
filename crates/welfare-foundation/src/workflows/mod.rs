pub mod assessment;
pub mod survey;
