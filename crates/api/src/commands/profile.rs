//! Profile page commands
//!
//! Thin wrappers over [`ProfileEditor`](talentfolio_core::ProfileEditor): each
//! validates, calls one endpoint and applies the echoed data to the store.

use talentfolio_domain::{
    EditingSection, EducationItem, Info, InfoPatch, Location, LocationPatch, Notification,
    PortalError, Preference, PreferencePatch, Result as DomainResult, Upload, User, WorkItem,
};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Reload the profile and return it.
pub async fn fetch_profile(ctx: &AppContext) -> DomainResult<User> {
    execute_command("profile::fetch_profile", || async move {
        ctx.editor.refresh().await?;
        ctx.store
            .user()
            .ok_or_else(|| PortalError::InvalidState("profile was cleared while loading".into()))
    })
    .await
}

/// Open the edit panel; `None` opens the main profile section.
pub fn open_editor(ctx: &AppContext, section: Option<EditingSection>) {
    ctx.editor.open(section);
}

pub fn close_editor(ctx: &AppContext) {
    ctx.editor.close();
}

pub async fn update_info(ctx: &AppContext, info: Info) -> DomainResult<InfoPatch> {
    execute_command("profile::update_info", || async move { ctx.editor.save_info(info).await })
        .await
}

pub async fn update_location(ctx: &AppContext, location: Location) -> DomainResult<LocationPatch> {
    execute_command("profile::update_location", || async move {
        ctx.editor.save_location(location).await
    })
    .await
}

pub async fn update_preferences(
    ctx: &AppContext,
    preference: Preference,
) -> DomainResult<PreferencePatch> {
    execute_command("profile::update_preferences", || async move {
        ctx.editor.save_preferences(preference).await
    })
    .await
}

pub async fn add_work(ctx: &AppContext, item: WorkItem) -> DomainResult<WorkItem> {
    execute_command("profile::add_work", || async move { ctx.editor.add_work(item).await }).await
}

pub async fn update_work(ctx: &AppContext, item: WorkItem) -> DomainResult<WorkItem> {
    execute_command("profile::update_work", || async move { ctx.editor.update_work(item).await })
        .await
}

pub async fn delete_work(ctx: &AppContext, id: &str) -> DomainResult<()> {
    execute_command("profile::delete_work", || async move { ctx.editor.delete_work(id).await })
        .await
}

pub async fn add_education(ctx: &AppContext, item: EducationItem) -> DomainResult<EducationItem> {
    execute_command("profile::add_education", || async move {
        ctx.editor.add_education(item).await
    })
    .await
}

pub async fn update_education(
    ctx: &AppContext,
    item: EducationItem,
) -> DomainResult<EducationItem> {
    execute_command("profile::update_education", || async move {
        ctx.editor.update_education(item).await
    })
    .await
}

pub async fn delete_education(ctx: &AppContext, id: &str) -> DomainResult<()> {
    execute_command("profile::delete_education", || async move {
        ctx.editor.delete_education(id).await
    })
    .await
}

/// Returns the stored resume URL.
pub async fn upload_resume(ctx: &AppContext, file: Upload) -> DomainResult<String> {
    execute_command("profile::upload_resume", || async move {
        ctx.editor.upload_resume(file).await
    })
    .await
}

pub async fn delete_resume(ctx: &AppContext) -> DomainResult<()> {
    execute_command("profile::delete_resume", || async move { ctx.editor.delete_resume().await })
        .await
}

/// Returns the stored image URL.
pub async fn upload_profile_image(ctx: &AppContext, file: Upload) -> DomainResult<String> {
    execute_command("profile::upload_profile_image", || async move {
        ctx.editor.upload_profile_image(file).await
    })
    .await
}

pub async fn delete_profile_image(ctx: &AppContext) -> DomainResult<()> {
    execute_command("profile::delete_profile_image", || async move {
        ctx.editor.delete_profile_image().await
    })
    .await
}

pub async fn list_notifications(ctx: &AppContext) -> DomainResult<Vec<Notification>> {
    execute_command("profile::list_notifications", || async move {
        ctx.editor.notifications().await
    })
    .await
}
