pub mod extractor;
pub mod filters;
pub mod library;
pub mod parser;
pub mod providers;
pub mod retry;
pub mod session;
pub mod sources;
pub mod translator;

pub use library::Library;
pub use session::ConversationSession;
