pub mod criteria;
pub mod policy;
