//! Onboarding survey route handlers.
//!
//! Every action posts a single-field form and redirects back to the survey,
//! or to `/` once the survey is done.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use fashion_assistant_core::{Gender, OnboardingFlow, OnboardingStep, PriceRange, Style};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::SessionContextHandle;

/// A single choice submitted from the survey.
#[derive(Debug, Deserialize)]
pub struct ChoiceForm {
    pub value: String,
}

/// One answer button.
#[derive(Clone, Debug)]
pub struct ChoiceView {
    pub label: &'static str,
    pub selected: bool,
}

/// Survey page template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding.html")]
pub struct OnboardingTemplate {
    pub step_number: u8,
    pub question: &'static str,
    /// Form action for single-select answers.
    pub action: &'static str,
    pub choices: Vec<ChoiceView>,
    pub multi_select: bool,
    pub can_submit: bool,
}

impl OnboardingTemplate {
    /// The page for the survey's current step, `None` once done.
    fn for_flow(flow: &OnboardingFlow) -> Option<Self> {
        let step = flow.step();
        let step_number = step.number()?;

        let template = match step {
            OnboardingStep::Gender => Self {
                step_number,
                question: "What gender of apparel are you looking for?",
                action: "/onboarding/gender",
                choices: single(Gender::ALL.iter().map(|g| g.label())),
                multi_select: false,
                can_submit: false,
            },
            OnboardingStep::Price => Self {
                step_number,
                question: "What's your preferred price range?",
                action: "/onboarding/price",
                choices: single(PriceRange::ALL.iter().map(|p| p.label())),
                multi_select: false,
                can_submit: false,
            },
            OnboardingStep::Styles => Self {
                step_number,
                question: "What are your preferred styles?",
                action: "/onboarding/styles/toggle",
                choices: Style::ALL
                    .iter()
                    .map(|style| ChoiceView {
                        label: style.label(),
                        selected: flow.is_style_selected(*style),
                    })
                    .collect(),
                multi_select: true,
                can_submit: flow.can_submit_styles(),
            },
            OnboardingStep::Done => return None,
        };

        Some(template)
    }
}

fn single(labels: impl Iterator<Item = &'static str>) -> Vec<ChoiceView> {
    labels
        .map(|label| ChoiceView {
            label,
            selected: false,
        })
        .collect()
}

/// Where to go after an action leaves the survey at `step`.
fn redirect_after(step: OnboardingStep) -> Redirect {
    if step == OnboardingStep::Done {
        Redirect::to("/")
    } else {
        Redirect::to("/onboarding")
    }
}

/// Show the current survey step.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn show(ctx: SessionContextHandle) -> Response {
    if ctx.onboarding_complete() {
        return Redirect::to("/").into_response();
    }

    let page = OnboardingTemplate::for_flow(&ctx.onboarding());
    page.map_or_else(|| Redirect::to("/").into_response(), IntoResponse::into_response)
}

/// Answer the gender question.
///
/// # Errors
///
/// Returns 400 for an unknown gender and 409 if the survey is not at the
/// gender step.
#[instrument(skip(ctx), fields(session_id = %ctx.id()))]
pub async fn select_gender(
    ctx: SessionContextHandle,
    Form(form): Form<ChoiceForm>,
) -> Result<Redirect> {
    let gender: Gender = form.value.parse()?;
    let step = ctx.onboarding().select_gender(gender, ctx.preferences())?;
    add_breadcrumb("onboarding", "Selected gender", Some(&[("gender", gender.label())]));
    Ok(redirect_after(step))
}

/// Answer the price question.
///
/// # Errors
///
/// Returns 400 for an unknown price range and 409 if the survey is not at
/// the price step.
#[instrument(skip(ctx), fields(session_id = %ctx.id()))]
pub async fn select_price(
    ctx: SessionContextHandle,
    Form(form): Form<ChoiceForm>,
) -> Result<Redirect> {
    let price: PriceRange = form.value.parse()?;
    let step = ctx.onboarding().select_price(price, ctx.preferences())?;
    add_breadcrumb("onboarding", "Selected price", Some(&[("price", price.label())]));
    Ok(redirect_after(step))
}

/// Select or deselect a style.
///
/// # Errors
///
/// Returns 400 for an unknown style and 409 if the survey is not at the
/// styles step.
#[instrument(skip(ctx), fields(session_id = %ctx.id()))]
pub async fn toggle_style(
    ctx: SessionContextHandle,
    Form(form): Form<ChoiceForm>,
) -> Result<Redirect> {
    let style: Style = form.value.parse()?;
    let selected = ctx.onboarding().toggle_style(style)?;
    tracing::debug!(style = style.label(), selected, "Toggled style");
    Ok(Redirect::to("/onboarding"))
}

/// Submit the selected styles and finish the survey.
///
/// # Errors
///
/// Returns 409 if no style is selected or the survey is not at the styles
/// step.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn submit_styles(ctx: SessionContextHandle) -> Result<Redirect> {
    let step = ctx.onboarding().submit_styles(ctx.preferences())?;
    add_breadcrumb("onboarding", "Submitted styles", None);
    Ok(redirect_after(step))
}

/// Skip the current question.
///
/// # Errors
///
/// Returns 409 if the survey is already complete.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn skip(ctx: SessionContextHandle) -> Result<Redirect> {
    let step = ctx.onboarding().skip(ctx.preferences())?;
    add_breadcrumb("onboarding", "Skipped question", None);
    Ok(redirect_after(step))
}
