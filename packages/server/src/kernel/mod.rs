// Infrastructure layer - dependency container, trait seams and concrete
// implementations for everything that talks to the outside world.

pub mod deps;
pub mod media;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioAdapter};
pub use media::DiskMediaStore;
pub use traits::{BaseMediaStore, BaseOtpService};
