mod broker;
mod playback;
mod session;
mod surface;

pub use broker::CredentialBroker;
pub use playback::Phase;
pub use playback::PlaybackController;
pub use playback::PlaybackState;
pub use playback::Subscriber;
pub use session::Session;
pub use surface::AudioSurface;
pub use surface::PlaybackSurface;
pub use surface::SurfaceStatus;
