//! Repositories wrapping SeaORM queries.

mod claim;
mod found_item;
mod lost_item;
mod user;

pub use claim::ClaimRepository;
pub use found_item::FoundItemRepository;
pub use lost_item::LostItemRepository;
pub use user::UserRepository;
