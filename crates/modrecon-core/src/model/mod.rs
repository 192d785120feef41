pub mod manifest;
pub mod participant;
pub mod record;

pub use manifest::Manifest;
pub use participant::ParticipantId;
pub use record::{InstallState, ModRecord};
