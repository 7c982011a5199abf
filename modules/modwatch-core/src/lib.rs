pub mod adapters;
pub mod blocklist;
pub mod classifier;
pub mod gate;
pub mod progress;
pub mod records;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use adapters::{DetaStore, HttpBlocklistSource};
pub use blocklist::Blocklist;
pub use classifier::{Classification, Echo, Outcome, ReportClassifier, Submission};
pub use gate::CaptchaGate;
pub use progress::Progress;
pub use records::Records;
pub use traits::{BlocklistSource, CaptchaVerifier, Collection, Filter, RecordStore};
