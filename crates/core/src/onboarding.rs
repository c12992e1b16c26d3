//! The onboarding survey as a state machine.
//!
//! ```text
//! Gender ──select/skip──▶ Price ──select/skip──▶ Styles ──submit/skip──▶ Done
//! ```
//!
//! Selections in the first two steps are written to the preferences as soon
//! as they are made. Styles are collected locally and only written when the
//! selection is submitted. There is no way back to an earlier step.

use core::fmt;

use crate::types::{Gender, PreferencesUpdate, PriceRange, Style};

/// Receives the writes the survey makes.
pub trait PreferencesSink {
    /// Merge `update` into the stored preferences.
    fn update_preferences(&self, update: PreferencesUpdate);
}

/// Callback fired once when the survey reaches [`OnboardingStep::Done`].
pub type CompletionHook = Box<dyn FnOnce() + Send>;

/// Where the survey currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    Gender,
    Price,
    Styles,
    Done,
}

impl OnboardingStep {
    /// 1-based position shown to the user, `None` once done.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::Gender => Some(1),
            Self::Price => Some(2),
            Self::Styles => Some(3),
            Self::Done => None,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Gender => Self::Price,
            Self::Price => Self::Styles,
            Self::Styles | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gender => "gender",
            Self::Price => "price",
            Self::Styles => "styles",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// An action the survey cannot take in its current state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("expected the {expected} step, survey is at the {actual} step")]
    WrongStep {
        expected: OnboardingStep,
        actual: OnboardingStep,
    },
    #[error("select at least one style before submitting")]
    NoStylesSelected,
    #[error("onboarding is already complete")]
    AlreadyComplete,
}

/// Progress through the three onboarding questions.
pub struct OnboardingFlow {
    step: OnboardingStep,
    selected_styles: Vec<Style>,
    on_complete: Option<CompletionHook>,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OnboardingFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingFlow")
            .field("step", &self.step)
            .field("selected_styles", &self.selected_styles)
            .field("on_complete", &self.on_complete.as_ref().map(|_| "hook"))
            .finish()
    }
}

impl OnboardingFlow {
    /// A survey at its first step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: OnboardingStep::Gender,
            selected_styles: Vec::new(),
            on_complete: None,
        }
    }

    /// A survey that calls `hook` when it completes.
    #[must_use]
    pub fn with_completion_hook(hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_complete: Some(Box::new(hook)),
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.step == OnboardingStep::Done
    }

    /// Styles selected so far, in the order they were first picked.
    #[must_use]
    pub fn selected_styles(&self) -> &[Style] {
        &self.selected_styles
    }

    #[must_use]
    pub fn is_style_selected(&self, style: Style) -> bool {
        self.selected_styles.contains(&style)
    }

    /// Whether the style selection may be submitted.
    #[must_use]
    pub fn can_submit_styles(&self) -> bool {
        self.step == OnboardingStep::Styles && !self.selected_styles.is_empty()
    }

    /// Answer the gender question and move to the price question.
    ///
    /// # Errors
    ///
    /// Returns an error unless the survey is at the gender step.
    pub fn select_gender(
        &mut self,
        gender: Gender,
        sink: &impl PreferencesSink,
    ) -> Result<OnboardingStep, OnboardingError> {
        self.expect_step(OnboardingStep::Gender)?;
        sink.update_preferences(PreferencesUpdate::gender(gender.label()));
        Ok(self.advance())
    }

    /// Answer the price question and move to the styles question.
    ///
    /// # Errors
    ///
    /// Returns an error unless the survey is at the price step.
    pub fn select_price(
        &mut self,
        price: PriceRange,
        sink: &impl PreferencesSink,
    ) -> Result<OnboardingStep, OnboardingError> {
        self.expect_step(OnboardingStep::Price)?;
        sink.update_preferences(PreferencesUpdate::price(price.label()));
        Ok(self.advance())
    }

    /// Select `style`, or deselect it if already selected.
    ///
    /// Returns whether the style is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error unless the survey is at the styles step.
    pub fn toggle_style(&mut self, style: Style) -> Result<bool, OnboardingError> {
        self.expect_step(OnboardingStep::Styles)?;
        if let Some(pos) = self.selected_styles.iter().position(|s| *s == style) {
            self.selected_styles.remove(pos);
            Ok(false)
        } else {
            self.selected_styles.push(style);
            Ok(true)
        }
    }

    /// Write the selected styles and finish the survey.
    ///
    /// # Errors
    ///
    /// Returns an error unless the survey is at the styles step with at
    /// least one style selected.
    pub fn submit_styles(
        &mut self,
        sink: &impl PreferencesSink,
    ) -> Result<OnboardingStep, OnboardingError> {
        self.expect_step(OnboardingStep::Styles)?;
        if self.selected_styles.is_empty() {
            return Err(OnboardingError::NoStylesSelected);
        }

        let styles = self
            .selected_styles
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        sink.update_preferences(PreferencesUpdate::styles(styles));
        self.complete(sink);
        Ok(self.step)
    }

    /// Skip the current question without writing an answer.
    ///
    /// Skipping the styles question finishes the survey; any styles selected
    /// but not submitted are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::AlreadyComplete`] once the survey is done.
    pub fn skip(
        &mut self,
        sink: &impl PreferencesSink,
    ) -> Result<OnboardingStep, OnboardingError> {
        match self.step {
            OnboardingStep::Done => Err(OnboardingError::AlreadyComplete),
            OnboardingStep::Styles => {
                self.complete(sink);
                Ok(self.step)
            }
            OnboardingStep::Gender | OnboardingStep::Price => Ok(self.advance()),
        }
    }

    fn expect_step(&self, expected: OnboardingStep) -> Result<(), OnboardingError> {
        if self.step == expected {
            Ok(())
        } else if self.step == OnboardingStep::Done {
            Err(OnboardingError::AlreadyComplete)
        } else {
            Err(OnboardingError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn advance(&mut self) -> OnboardingStep {
        self.step = self.step.next();
        self.step
    }

    fn complete(&mut self, sink: &impl PreferencesSink) {
        self.step = OnboardingStep::Done;
        self.selected_styles.clear();
        sink.update_preferences(PreferencesUpdate::completed());
        if let Some(hook) = self.on_complete.take() {
            hook();
        }
    }
}
