// Role snapshot and policy evaluation

pub mod evaluator;
pub mod policy;
pub mod roles;
