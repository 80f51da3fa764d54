pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod interaction;
pub mod layout;
pub mod math;
pub mod picking;
pub mod presentation;
pub mod scene;
pub mod showcase;
pub mod spotlight;

pub use camera::{framing_for_model, CameraRig, CameraTransition, Framing};
pub use config::{GalleryConfig, GalleryItem, LightingSettings, Settings, SpotlightSettings};
pub use error::{Result, ShowcaseError};
pub use events::{EventBus, ShowcaseEvent, Signal};
pub use interaction::{DragTransition, InteractionController, ResolvedRotation};
pub use layout::Viewport;
pub use presentation::{Activation, LoadStatus, ModelState, Phase, Presentation};
pub use scene::{Bounds, CameraPose, LightPose, SceneGraph, SpotlightDesc, Transform};
pub use showcase::Showcase;
pub use spotlight::{SpotlightManager, SpotlightState};
