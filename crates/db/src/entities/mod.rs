//! SeaORM entities.

pub mod category;
pub mod claim;
pub mod found_item;
pub mod lost_item;
pub mod user;

pub use category::Category;
pub use claim::{ClaimStatus, Entity as Claim};
pub use found_item::{Entity as FoundItem, QuestionAnswer};
pub use lost_item::Entity as LostItem;
pub use user::Entity as User;
