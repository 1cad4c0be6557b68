// Member domain module
// Contains the member entity, search condition, and read projections

#![allow(clippy::module_inception)]

pub mod dto;
pub mod member;
pub mod search;

// Re-export main types for convenience
pub use dto::{MemberDto, MemberTeamDto, MemberWithTeam, RankedMember, TeamAgeSummary, UserDto};
pub use member::{Member, NewMember};
pub use search::{
    Direction, MemberSearchCondition, NullsOrder, Page, PageRequest, SortField, SortOrder,
};
