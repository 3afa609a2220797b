pub mod cross_entropy;
pub mod quadratic;
pub mod cost_type;

pub use cross_entropy::CrossEntropyCost;
pub use quadratic::QuadraticCost;
pub use cost_type::CostType;
