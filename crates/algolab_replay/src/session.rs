//! Control surface for one visualization session.
//!
//! A [`LabSession`] ties the selected algorithm and its input to a trace and
//! a [`PlaybackController`]. Every user action goes through here, and the
//! UI reads back a [`ReadModel`].

use crate::assistant::{AssistantError, CodeAssistant, CodeRequest};
use crate::config::LabConfig;
use crate::controller::{PlaybackController, PlaybackStatus, TickOutcome, TimerEpoch};
use algolab_core::{Algorithm, SpeedDial, Trace};
use algolab_render::{RenderError, RendererRegistry, StructureLayout, VisualDescription};
use algolab_trace::{
    default_input, parse_input, random_input, AlgorithmInput, CatalogError, GeneratorRegistry,
    InputError, RawParams,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Error from a session action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Algorithm tag not recognized
    #[error("unknown algorithm '{name}'")]
    UnknownAlgorithm {
        /// Tag as given
        name: String,
    },

    /// Raw parameters did not parse
    #[error(transparent)]
    Input(#[from] InputError),

    /// Generation rejected the input
    #[error(transparent)]
    Generate(#[from] CatalogError),

    /// Current step could not be drawn
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Code assistant failed
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// One user action, in a form a UI can send over a channel or the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Switch algorithm by tag
    SelectAlgorithm(String),
    /// Replace the input from raw key/value text
    SetInputParameters(RawParams),
    /// Replace the input with a seeded random one; `None` uses the
    /// configured seed
    Randomize(Option<u64>),
    /// Start auto-advance
    Play,
    /// Suspend auto-advance
    Pause,
    /// Back to the start
    Reset,
    /// One step forward
    StepForward,
    /// One step back
    StepBackward,
    /// Move the speed dial
    SetSpeed(i64),
    /// Jump to a position
    Seek(usize),
}

/// Everything a UI needs to draw the controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadModel {
    /// Selected algorithm
    pub algorithm: Algorithm,
    /// Current position, `0..=max_index`
    pub current_index: usize,
    /// Trace length
    pub max_index: usize,
    /// Playback status
    pub status: PlaybackStatus,
    /// Speed dial
    pub speed: SpeedDial,
    /// Description of the step on screen
    pub current_description: String,
    /// Last input problem, cleared by the next accepted input
    pub message: Option<String>,
}

/// Session state behind the control surface
#[derive(Debug)]
pub struct LabSession {
    config: LabConfig,
    generators: GeneratorRegistry,
    renderers: RendererRegistry,
    algorithm: Algorithm,
    input: AlgorithmInput,
    controller: PlaybackController,
    message: Option<String>,
    generated_code: IndexMap<Algorithm, String>,
}

impl LabSession {
    /// Session on the configured initial algorithm with its default input
    ///
    /// # Errors
    ///
    /// Returns error if the default input violates the configured limits
    pub fn new(config: LabConfig) -> Result<Self, SessionError> {
        Self::with_registries(
            config,
            GeneratorRegistry::with_defaults(),
            RendererRegistry::with_defaults(),
        )
    }

    /// Session using custom generator and renderer registries
    ///
    /// # Errors
    ///
    /// Returns error if the initial trace cannot be generated
    pub fn with_registries(
        config: LabConfig,
        generators: GeneratorRegistry,
        renderers: RendererRegistry,
    ) -> Result<Self, SessionError> {
        let algorithm = config.playback.initial_algorithm;
        let input = default_input(algorithm);
        let trace = generators.generate(algorithm, &input, &config.limits)?;
        let controller = PlaybackController::new(Arc::new(trace), config.playback.initial_speed);
        info!(%algorithm, steps = controller.len(), "session started");

        Ok(Self {
            config,
            generators,
            renderers,
            algorithm,
            input,
            controller,
            message: None,
            generated_code: IndexMap::new(),
        })
    }

    /// Configuration the session was created with
    #[must_use]
    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Selected algorithm
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Input behind the current trace
    #[must_use]
    pub fn input(&self) -> &AlgorithmInput {
        &self.input
    }

    /// Current trace
    #[must_use]
    pub fn trace(&self) -> &Arc<Trace> {
        self.controller.trace()
    }

    /// Playback controller
    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Last input problem
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Switch to the algorithm tagged `name` with its default input
    ///
    /// # Errors
    ///
    /// Returns error if the tag is unknown; the session is left unchanged
    pub fn select_algorithm(&mut self, name: &str) -> Result<(), SessionError> {
        let algorithm: Algorithm = name.parse().map_err(|_| SessionError::UnknownAlgorithm {
            name: name.to_string(),
        })?;
        let input = default_input(algorithm);
        let trace = self
            .generators
            .generate(algorithm, &input, &self.config.limits)?;
        self.algorithm = algorithm;
        self.install(input, trace);
        Ok(())
    }

    /// Replace the input of the selected algorithm from raw parameters.
    ///
    /// Rejected input keeps the previous trace, resets playback and records
    /// the problem in the read model's message.
    ///
    /// # Errors
    ///
    /// Returns error if a field does not parse or the input is out of range
    pub fn set_input_parameters(&mut self, params: &RawParams) -> Result<(), SessionError> {
        let generated = parse_input(self.algorithm, params)
            .map_err(SessionError::from)
            .and_then(|input| {
                self.generators
                    .generate(self.algorithm, &input, &self.config.limits)
                    .map(|trace| (input, trace))
                    .map_err(SessionError::from)
            });

        match generated {
            Ok((input, trace)) => {
                self.install(input, trace);
                Ok(())
            }
            Err(err) => {
                warn!(algorithm = %self.algorithm, error = %err, "input rejected");
                self.controller.reset();
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the input with a seeded random one
    ///
    /// # Errors
    ///
    /// Returns error if the generated input is rejected
    pub fn randomize(&mut self, seed: u64) -> Result<(), SessionError> {
        let input = random_input(self.algorithm, seed, &self.config.limits);
        let trace = self
            .generators
            .generate(self.algorithm, &input, &self.config.limits)?;
        self.install(input, trace);
        Ok(())
    }

    fn install(&mut self, input: AlgorithmInput, trace: Trace) {
        debug!(algorithm = %self.algorithm, steps = trace.len(), "trace installed");
        self.input = input;
        self.message = None;
        self.controller.retrace(Arc::new(trace));
    }

    /// Start auto-advance
    pub fn play(&mut self) {
        self.controller.play();
    }

    /// Suspend auto-advance
    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Back to the start
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// One step forward
    pub fn step_forward(&mut self) {
        self.controller.step_forward();
    }

    /// One step back
    pub fn step_backward(&mut self) {
        self.controller.step_backward();
    }

    /// Move the speed dial; out-of-range values are clamped
    pub fn set_speed(&mut self, dial: i64) {
        self.controller.set_speed(SpeedDial::new(dial));
    }

    /// Jump to `index`
    pub fn seek(&mut self, index: usize) {
        self.controller.seek(index);
    }

    /// Deliver a timer firing
    pub fn tick(&mut self, epoch: TimerEpoch) -> TickOutcome {
        self.controller.tick(epoch)
    }

    /// Apply one [`Action`]
    ///
    /// # Errors
    ///
    /// Returns error from algorithm selection or input parameters
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::SelectAlgorithm(name) => self.select_algorithm(&name)?,
            Action::SetInputParameters(params) => self.set_input_parameters(&params)?,
            Action::Randomize(seed) => self.randomize(seed.unwrap_or(self.config.seed))?,
            Action::Play => self.play(),
            Action::Pause => self.pause(),
            Action::Reset => self.reset(),
            Action::StepForward => self.step_forward(),
            Action::StepBackward => self.step_backward(),
            Action::SetSpeed(dial) => self.set_speed(dial),
            Action::Seek(index) => self.seek(index),
        }
        Ok(())
    }

    /// Read model for the controls
    #[must_use]
    pub fn read_model(&self) -> ReadModel {
        let trace = self.controller.trace();
        let current_description = match self.controller.current_step().or_else(|| trace.last()) {
            Some(step) => step.description.clone(),
            None => "Nothing to show".to_string(),
        };
        ReadModel {
            algorithm: self.algorithm,
            current_index: self.controller.current_index(),
            max_index: self.controller.len(),
            status: self.controller.status(),
            speed: self.controller.speed(),
            current_description,
            message: self.message.clone(),
        }
    }

    /// Default geometry for the current input
    #[must_use]
    pub fn default_layout(&self) -> StructureLayout {
        StructureLayout::for_input(&self.input)
    }

    /// Describe the current position on `layout`
    ///
    /// # Errors
    ///
    /// Returns error if the layout does not fit the algorithm
    pub fn render(&self, layout: &StructureLayout) -> Result<VisualDescription, SessionError> {
        Ok(self.renderers.render(
            self.controller.trace(),
            self.controller.current_index(),
            layout,
        )?)
    }

    /// Code previously generated for `algorithm`
    #[must_use]
    pub fn generated_code(&self, algorithm: Algorithm) -> Option<&str> {
        self.generated_code.get(&algorithm).map(String::as_str)
    }

    /// Ask `assistant` for code for the selected algorithm and keep the
    /// reply. Playback and trace are untouched either way.
    ///
    /// # Errors
    ///
    /// Returns error if the prompt is blank or the assistant fails
    pub async fn request_code(
        &mut self,
        assistant: &dyn CodeAssistant,
        prompt: &str,
    ) -> Result<&str, SessionError> {
        let request = CodeRequest::new(self.algorithm, prompt);
        request.validate()?;
        let code = assistant.generate(&request).await?;
        info!(algorithm = %self.algorithm, bytes = code.len(), "code generated");
        let slot = self.generated_code.entry(self.algorithm).or_default();
        *slot = code;
        Ok(slot.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolab_trace::GeneratorLimits;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session() -> LabSession {
        LabSession::new(LabConfig::default()).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_new_session_starts_idle_on_bubble_sort() {
        let session = session();
        let model = session.read_model();
        assert_eq!(model.algorithm, Algorithm::BubbleSort);
        assert_eq!(model.current_index, 0);
        assert_eq!(model.max_index, 45);
        assert_eq!(model.status, PlaybackStatus::Idle);
        assert_eq!(model.speed, SpeedDial::DEFAULT);
        assert!(model.message.is_none());
    }

    #[test]
    fn test_select_algorithm_by_tag() {
        let mut s = session();
        s.step_forward();
        s.select_algorithm("kruskal").unwrap();
        let model = s.read_model();
        assert_eq!(model.algorithm, Algorithm::Kruskal);
        assert_eq!(model.current_index, 0);
        assert_eq!(model.status, PlaybackStatus::Idle);
        assert!(matches!(s.default_layout(), StructureLayout::Graph(_)));
    }

    #[test]
    fn test_unknown_algorithm_leaves_session_alone() {
        let mut s = session();
        let before = Arc::clone(s.trace());
        let err = s.select_algorithm("quick-sort").unwrap_err();
        assert_eq!(err.to_string(), "unknown algorithm 'quick-sort'");
        assert!(Arc::ptr_eq(&before, s.trace()));
        assert_eq!(s.algorithm(), Algorithm::BubbleSort);
    }

    #[test]
    fn test_scenario_bubble_sort_five_values() {
        let mut s = session();
        s.set_input_parameters(&params(&[("values", "5,3,1,4,2")]))
            .unwrap();
        assert_eq!(s.read_model().max_index, 10);

        for _ in 0..10 {
            s.step_forward();
        }
        let model = s.read_model();
        assert_eq!(model.status, PlaybackStatus::Completed);
        assert_eq!(model.current_index, 10);

        s.reset();
        assert_eq!(s.read_model().status, PlaybackStatus::Idle);
        assert_eq!(s.read_model().current_index, 0);
    }

    #[test]
    fn test_invalid_input_keeps_trace_and_resets() {
        let mut s = session();
        s.step_forward();
        s.step_forward();
        let before = Arc::clone(s.trace());

        let err = s
            .set_input_parameters(&params(&[("values", "4,x,2")]))
            .unwrap_err();
        assert!(matches!(err, SessionError::Input(InputError::NotNumeric { .. })));

        let model = s.read_model();
        assert!(Arc::ptr_eq(&before, s.trace()));
        assert_eq!(model.current_index, 0);
        assert_eq!(model.status, PlaybackStatus::Idle);
        assert_eq!(model.message.as_deref(), Some(err.to_string().as_str()));

        s.set_input_parameters(&params(&[("values", "2,1")])).unwrap();
        assert!(s.read_model().message.is_none());
    }

    #[test]
    fn test_limits_from_config() {
        let config =
            LabConfig::default().with_limits(GeneratorLimits::default().with_max_array_len(10));
        let mut s = LabSession::new(config).unwrap();
        let err = s
            .set_input_parameters(&params(&[("values", "1,2,3,4,5,6,7,8,9,10,11")]))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Generate(CatalogError::Input(InputError::OutOfRange { .. }))
        ));
        assert_eq!(s.read_model().max_index, 45);
        assert!(s.read_model().message.is_some());
    }

    #[test]
    fn test_apply_actions() {
        let mut s = session();
        s.apply(Action::SetSpeed(500)).unwrap();
        assert_eq!(s.read_model().speed, SpeedDial::MAX);

        s.apply(Action::StepForward).unwrap();
        s.apply(Action::StepForward).unwrap();
        s.apply(Action::StepBackward).unwrap();
        assert_eq!(s.read_model().current_index, 1);

        s.apply(Action::Play).unwrap();
        assert_eq!(s.read_model().status, PlaybackStatus::Playing);
        let epoch = s.controller().timer().map(|t| t.epoch).unwrap();
        assert_eq!(s.tick(epoch), TickOutcome::Advanced(2));

        s.apply(Action::Seek(7)).unwrap();
        assert_eq!(s.read_model().status, PlaybackStatus::Paused);
        assert_eq!(s.read_model().current_index, 7);

        s.apply(Action::SelectAlgorithm("fibonacci".into())).unwrap();
        assert_eq!(s.tick(epoch), TickOutcome::Stale);
        assert_eq!(s.read_model().algorithm, Algorithm::Fibonacci);
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{ "action": "select_algorithm", "value": "bfs" }"#).unwrap();
        assert_eq!(action, Action::SelectAlgorithm("bfs".into()));
        let action: Action = serde_json::from_str(r#"{ "action": "play" }"#).unwrap();
        assert_eq!(action, Action::Play);
    }

    #[test]
    fn test_render_follows_playback() {
        let mut s = session();
        s.set_input_parameters(&params(&[("values", "5,3,1,4,2")]))
            .unwrap();
        let layout = s.default_layout();
        let first = s.render(&layout).unwrap();
        assert_eq!(first.progress, "Step 1 of 10");

        s.seek(10);
        let last = s.render(&layout).unwrap();
        assert!(last.completed);
        assert_eq!(last.progress, "Completed (10 steps)");
        assert_eq!(s.read_model().current_description, last.caption);
    }

    #[test]
    fn test_render_rejects_foreign_layout() {
        let mut s = session();
        s.select_algorithm("lcs").unwrap();
        let bars = StructureLayout::Bars(Default::default());
        assert!(matches!(s.render(&bars), Err(SessionError::Render(_))));
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut a = session();
        let mut b = session();
        a.randomize(11).unwrap();
        b.randomize(11).unwrap();
        assert_eq!(a.input(), b.input());
        assert_eq!(a.trace().len(), b.trace().len());
    }

    #[test]
    fn test_randomize_falls_back_to_configured_seed() {
        let mut configured = LabSession::new(LabConfig::default().with_seed(42)).unwrap();
        configured.apply(Action::Randomize(None)).unwrap();

        let mut explicit = session();
        explicit.randomize(42).unwrap();
        assert_eq!(configured.input(), explicit.input());

        let mut other = session();
        other.randomize(43).unwrap();
        assert_ne!(configured.input(), other.input());

        let action: Action =
            serde_json::from_str(r#"{ "action": "randomize", "value": null }"#).unwrap();
        assert_eq!(action, Action::Randomize(None));
    }

    struct Canned {
        calls: AtomicUsize,
        reply: Result<String, AssistantError>,
    }

    #[async_trait]
    impl CodeAssistant for Canned {
        async fn generate(&self, request: &CodeRequest) -> Result<String, AssistantError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map(|code| format!("// {}\n{}", request.algorithm, code))
        }
    }

    #[tokio::test]
    async fn test_request_code_is_cached_and_inert() {
        let assistant = Canned {
            calls: AtomicUsize::new(0),
            reply: Ok("fn main() {}".into()),
        };
        let mut s = session();
        s.step_forward();
        let before = s.read_model();

        let code = s.request_code(&assistant, "in rust").await.unwrap().to_string();
        assert_eq!(code, "// bubble-sort\nfn main() {}");
        assert_eq!(s.generated_code(Algorithm::BubbleSort), Some(code.as_str()));
        assert_eq!(s.read_model(), before);
        assert!(s.generated_code(Algorithm::Kruskal).is_none());
    }

    #[tokio::test]
    async fn test_request_code_errors() {
        let assistant = Canned {
            calls: AtomicUsize::new(0),
            reply: Err(AssistantError::Unavailable {
                reason: "no key".into(),
            }),
        };
        let mut s = session();

        let err = s.request_code(&assistant, "   ").await.unwrap_err();
        assert_eq!(err, SessionError::Assistant(AssistantError::EmptyPrompt));
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 0);

        let err = s.request_code(&assistant, "please").await.unwrap_err();
        assert_eq!(err.to_string(), "assistant unavailable: no key");
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 1);
        assert!(s.generated_code(Algorithm::BubbleSort).is_none());
    }
}
