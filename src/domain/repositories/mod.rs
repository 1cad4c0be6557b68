// Repository interfaces (ports)
// Implemented by adapters in infrastructure::repositories

pub mod error;
pub mod member_query_repository;
pub mod member_repository;
pub mod team_repository;

pub use error::RepositoryError;
pub use member_query_repository::MemberQueryRepository;
pub use member_repository::MemberRepository;
pub use team_repository::TeamRepository;
