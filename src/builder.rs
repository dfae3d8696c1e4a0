//! Builder for configuring and constructing a `Scene`.

use crate::config::SceneConfig;
use crate::scene::Scene;
use crate::Result;
use jamstage_instruments::{InstrumentFactory, NoResources, ResourceProvider};
use jamstage_midi::{ChannelStreams, MidiFile, TempoMap};
use tracing::debug;

/// Without a resource provider every instrument is assumed loadable, which
/// suits headless use and tests.
///
/// # Example
///
/// ```ignore
/// use jamstage::prelude::*;
///
/// let file = MidiFile::load("song.mid")?;
/// let mut scene = Scene::builder()
///     .config(SceneConfig::load("jamstage.toml")?)
///     .resources(|kind| renderer.load_model(kind))
///     .build(&file)?;
///
/// scene.tick(12.5, 1.0 / 60.0);
/// ```
pub struct SceneBuilder {
    config: SceneConfig,
    resources: Box<dyn ResourceProvider>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            config: SceneConfig::default(),
            resources: Box::new(NoResources),
        }
    }
}

impl SceneBuilder {
    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 1.0
    pub fn visibility_lead(mut self, seconds: f64) -> Self {
        self.config.visibility_lead_seconds = seconds;
        self
    }

    /// Default: 5.0
    pub fn visibility_tail(mut self, seconds: f64) -> Self {
        self.config.visibility_tail_seconds = seconds;
        self
    }

    pub fn resources(mut self, provider: impl ResourceProvider + 'static) -> Self {
        self.resources = Box::new(provider);
        self
    }

    pub fn build(self, file: &MidiFile) -> Result<Scene> {
        let streams = ChannelStreams::from_file(file);
        debug!(
            "Building scene from {} tracks, {} channel events",
            file.tracks.len(),
            streams.event_count()
        );
        self.build_from_streams(&streams, file.tempo_map().clone())
    }

    pub fn build_from_streams(
        mut self,
        streams: &ChannelStreams,
        tempo_map: TempoMap,
    ) -> Result<Scene> {
        self.config.validate()?;

        let factory = InstrumentFactory::new(tempo_map).window(self.config.window());
        Ok(Scene::calculate_instruments(
            streams,
            &factory,
            self.resources.as_mut(),
        ))
    }
}
