//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod posting;

pub use posting::{
    CancelPostingCommand, CancelPostingHandler, CloseExpiredPostingsCommand,
    CloseExpiredPostingsHandler, CloseExpiredPostingsResult, ClosePostingCommand,
    ClosePostingHandler, CreatePostingCommand, CreatePostingHandler, FindMatchingJobsHandler,
    FindMatchingJobsQuery, JobMatch, MarkPostingFilledCommand, MarkPostingFilledHandler,
    PublishPostingCommand, PublishPostingHandler, RecordApplicationCommand,
    RecordApplicationHandler, RecordApplicationResult, RecordViewCommand, RecordViewHandler,
    UpdateCompensationCommand, UpdateCompensationHandler, UpdatePostingDetailsCommand,
    UpdatePostingDetailsHandler, EXPIRY_REASON,
};
