// Dynamic SQL fragments for member queries
// Rendered onto sqlx::QueryBuilder; member is aliased `m`, team `t`

pub mod paging;
pub mod predicate;

pub use paging::{push_order_by, push_window};
pub use predicate::{MemberPredicate, Predicates};
