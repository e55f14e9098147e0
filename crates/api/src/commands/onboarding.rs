//! Onboarding wizard commands

use talentfolio_core::flows::{EducationDraft, ExperienceDraft, OnboardingStep};
use talentfolio_domain::{PortalError, Result as DomainResult, Upload};

use crate::context::AppContext;
use crate::utils::command_helpers::{execute_command, execute_command_sync};

fn no_row(kind: &str, index: usize) -> PortalError {
    PortalError::Validation(format!("There is no {kind} {}.", index + 1))
}

pub async fn onboarding_step(ctx: &AppContext) -> OnboardingStep {
    ctx.onboarding.lock().await.step()
}

/// Upload the resume picked in the first step; `None` means nothing was picked.
pub async fn upload_onboarding_resume(
    ctx: &AppContext,
    file: Option<Upload>,
) -> DomainResult<OnboardingStep> {
    execute_command("onboarding::upload_resume", || async move {
        let mut wizard = ctx.onboarding.lock().await;
        wizard.upload_resume(file).await?;
        Ok(wizard.step())
    })
    .await
}

pub async fn skip_onboarding_resume(ctx: &AppContext) -> DomainResult<OnboardingStep> {
    let mut wizard = ctx.onboarding.lock().await;
    execute_command_sync("onboarding::skip_resume", || {
        wizard.skip_resume()?;
        Ok(wizard.step())
    })
}

pub async fn education_drafts(ctx: &AppContext) -> Vec<EducationDraft> {
    ctx.onboarding.lock().await.education().to_vec()
}

/// Append an empty education row and return its index.
pub async fn add_education_draft(ctx: &AppContext) -> usize {
    let mut wizard = ctx.onboarding.lock().await;
    wizard.add_education();
    wizard.education().len() - 1
}

pub async fn set_education_draft(
    ctx: &AppContext,
    index: usize,
    draft: EducationDraft,
) -> DomainResult<()> {
    let mut wizard = ctx.onboarding.lock().await;
    let row = wizard.education_mut(index).ok_or_else(|| no_row("education", index))?;
    *row = draft;
    Ok(())
}

/// `false` when the row does not exist or is the last one left.
pub async fn remove_education_draft(ctx: &AppContext, index: usize) -> bool {
    ctx.onboarding.lock().await.remove_education(index)
}

pub async fn experience_drafts(ctx: &AppContext) -> Vec<ExperienceDraft> {
    ctx.onboarding.lock().await.experience().to_vec()
}

pub async fn add_experience_draft(ctx: &AppContext) -> usize {
    let mut wizard = ctx.onboarding.lock().await;
    wizard.add_experience();
    wizard.experience().len() - 1
}

pub async fn set_experience_draft(
    ctx: &AppContext,
    index: usize,
    draft: ExperienceDraft,
) -> DomainResult<()> {
    let mut wizard = ctx.onboarding.lock().await;
    let row = wizard.experience_mut(index).ok_or_else(|| no_row("experience", index))?;
    *row = draft;
    Ok(())
}

pub async fn remove_experience_draft(ctx: &AppContext, index: usize) -> bool {
    ctx.onboarding.lock().await.remove_experience(index)
}

/// Save the background step and return the community invite to show next.
pub async fn submit_background(ctx: &AppContext) -> DomainResult<&'static str> {
    execute_command("onboarding::submit_background", || async move {
        let mut wizard = ctx.onboarding.lock().await;
        wizard.submit().await?;
        Ok(wizard.community_link())
    })
    .await
}

/// Leave the wizard for the profile page.
pub async fn finish_onboarding(ctx: &AppContext) -> DomainResult<()> {
    let mut wizard = ctx.onboarding.lock().await;
    execute_command_sync("onboarding::finish", || wizard.finish())
}
