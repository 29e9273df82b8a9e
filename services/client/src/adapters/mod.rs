pub mod backend;
pub mod console;
pub mod decoder;
pub mod identity;
pub mod score;
pub mod token_store;

pub use backend::RestBackendAdapter;
pub use console::{ConsoleConfirmer, ConsoleNotifier};
pub use decoder::{upload_from_path, FsImageDecoder};
pub use identity::FirebaseIdentityAdapter;
pub use score::FirestoreScoreAdapter;
pub use token_store::FileTokenStore;
