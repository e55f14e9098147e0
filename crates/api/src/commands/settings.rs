//! Account settings commands
//!
//! Each change is two calls: request an OTP, then confirm with it. Email and
//! password changes end the session on success.

use talentfolio_core::flows::{DeleteStep, OtpStep};
use talentfolio_core::ChangePasswordFlow;
use talentfolio_domain::Result as DomainResult;

use crate::context::AppContext;
use crate::utils::command_helpers::{execute_command, execute_command_sync};

pub async fn request_email_change(
    ctx: &AppContext,
    old_email: &str,
    new_email: &str,
) -> DomainResult<OtpStep> {
    execute_command("settings::request_email_change", || async move {
        let mut flow = ctx.change_email.lock().await;
        flow.request(old_email, new_email).await?;
        Ok(flow.step())
    })
    .await
}

pub async fn confirm_email_change(
    ctx: &AppContext,
    otp_old_email: &str,
    otp_new_email: &str,
) -> DomainResult<()> {
    execute_command("settings::confirm_email_change", || async move {
        ctx.change_email.lock().await.confirm(otp_old_email, otp_new_email).await
    })
    .await
}

pub async fn request_password_change(
    ctx: &AppContext,
    old_password: &str,
    new_password: &str,
) -> DomainResult<OtpStep> {
    execute_command("settings::request_password_change", || async move {
        let mut flow = ctx.change_password.lock().await;
        flow.request(old_password, new_password).await?;
        Ok(flow.step())
    })
    .await
}

pub async fn confirm_password_change(ctx: &AppContext, otp: &str) -> DomainResult<()> {
    execute_command("settings::confirm_password_change", || async move {
        ctx.change_password.lock().await.confirm(otp).await
    })
    .await
}

/// Message to show under `field` for a failed password change, if any.
pub fn password_field_error(
    err: &talentfolio_domain::PortalError,
    field: &str,
) -> Option<String> {
    ChangePasswordFlow::field_error(err, field)
}

pub async fn request_phone_change(ctx: &AppContext, phone: &str) -> DomainResult<OtpStep> {
    execute_command("settings::request_phone_change", || async move {
        let mut flow = ctx.change_phone.lock().await;
        flow.request(phone).await?;
        Ok(flow.step())
    })
    .await
}

pub async fn confirm_phone_change(ctx: &AppContext, otp: &str) -> DomainResult<()> {
    execute_command("settings::confirm_phone_change", || async move {
        ctx.change_phone.lock().await.confirm(otp).await
    })
    .await
}

/// Back to the number field without sending anything.
pub async fn edit_phone_number(ctx: &AppContext) -> OtpStep {
    let mut flow = ctx.change_phone.lock().await;
    flow.edit_number();
    flow.step()
}

pub async fn request_account_deletion(ctx: &AppContext, password: &str) -> DomainResult<DeleteStep> {
    execute_command("settings::request_account_deletion", || async move {
        let mut flow = ctx.delete_account.lock().await;
        flow.request(password).await?;
        Ok(flow.step())
    })
    .await
}

/// Accept the OTP and move to the final confirmation. Nothing is sent yet.
pub async fn confirm_account_deletion(ctx: &AppContext, otp: &str) -> DomainResult<DeleteStep> {
    let mut flow = ctx.delete_account.lock().await;
    execute_command_sync("settings::confirm_account_deletion", || {
        flow.confirm(otp)?;
        Ok(flow.step())
    })
}

pub async fn cancel_account_deletion(ctx: &AppContext) -> DeleteStep {
    let mut flow = ctx.delete_account.lock().await;
    flow.cancel();
    flow.step()
}

pub async fn delete_account(ctx: &AppContext) -> DomainResult<()> {
    execute_command("settings::delete_account", || async move {
        ctx.delete_account.lock().await.execute().await
    })
    .await
}
