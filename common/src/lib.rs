//! Results Lookup Common Library
//!
//! CLIとWeb(WASM)で共有される型・照合・検索フロー

pub mod types;
pub mod error;
pub mod dataset;
pub mod matcher;
pub mod session;
pub mod verifier;

pub use types::StudentRecord;
pub use error::{Error, Result};
pub use dataset::Dataset;
pub use matcher::{find, normalize_identifier};
pub use session::{
    Attempt, CelebrationToken, Failure, Phase, Resolution, SearchSession, SearchState,
    SessionError, Submission, CELEBRATION_WINDOW,
};
pub use verifier::{VerificationError, Verifier, VERIFY_DELAY};
