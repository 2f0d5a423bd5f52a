mod condition;
mod evaluator;
mod record;

pub use condition::{Condition, RuleError};
pub use evaluator::{Evaluator, Outcome};
pub use record::AlertRecord;
