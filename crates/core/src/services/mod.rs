//! Business logic services.

#![allow(missing_docs)]

pub mod claim;
pub mod found_item;
pub mod identity;
pub mod lost_item;
pub mod question_template;
pub mod search;

pub use claim::{
    APPROVAL_THRESHOLD, ClaimHistoryEntry, ClaimOutcome, ClaimService, Quiz, QuizQuestion,
    SubmitClaimInput, score_answers,
};
pub use found_item::{FoundItemService, FoundItemWithClaims, PhotoUpload, ReportFoundItemInput};
pub use identity::{GateDecision, IdentityService, Principal, TokenClaims, whatsapp_link};
pub use lost_item::{LostItemService, ReportLostItemInput};
pub use question_template::{DraftQuestion, QuestionSet, QuestionTemplate};
pub use search::{DateWindow, FoundItemSummary, SEARCH_WINDOW_DAYS, SearchService};

/// Shared photo store handle.
pub type PhotoStorage = std::sync::Arc<dyn lostfound_common::PhotoStore>;
