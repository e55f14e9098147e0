//! Sign-in, signup and password reset commands

use talentfolio_core::flows::{ForgotPasswordStep, SignupForm, SignupStep};
use talentfolio_domain::constants::ROUTE_SIGNIN;
use talentfolio_domain::{OAuthProvider, Result as DomainResult};
use tracing::debug;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

pub async fn sign_in(ctx: &AppContext, email: &str, password: &str) -> DomainResult<()> {
    execute_command("auth::sign_in", || async move {
        ctx.signin.lock().await.submit(email, password).await
    })
    .await
}

/// Consent page URL for social login.
pub async fn social_login_url(ctx: &AppContext, provider: OAuthProvider) -> DomainResult<String> {
    execute_command("auth::social_login_url", || async move {
        ctx.signin.lock().await.social_redirect(provider).await
    })
    .await
}

pub async fn request_signup_otp(ctx: &AppContext, email: &str) -> DomainResult<SignupStep> {
    execute_command("auth::request_signup_otp", || async move {
        let mut flow = ctx.signup.lock().await;
        flow.request_otp(email).await?;
        Ok(flow.step())
    })
    .await
}

/// Go back to the email field of the signup form.
pub async fn change_signup_email(ctx: &AppContext) -> SignupStep {
    let mut flow = ctx.signup.lock().await;
    flow.change_email();
    flow.step()
}

pub async fn complete_signup(ctx: &AppContext, form: SignupForm) -> DomainResult<()> {
    execute_command("auth::complete_signup", || async move {
        ctx.signup.lock().await.complete(form).await
    })
    .await
}

pub async fn request_password_reset(
    ctx: &AppContext,
    email: &str,
) -> DomainResult<ForgotPasswordStep> {
    execute_command("auth::request_password_reset", || async move {
        let mut flow = ctx.forgot_password.lock().await;
        flow.request_otp(email).await?;
        Ok(flow.step())
    })
    .await
}

pub async fn resend_password_reset(ctx: &AppContext) -> DomainResult<()> {
    execute_command("auth::resend_password_reset", || async move {
        ctx.forgot_password.lock().await.resend().await
    })
    .await
}

pub async fn reset_password(ctx: &AppContext, otp: &str, new_password: &str) -> DomainResult<()> {
    execute_command("auth::reset_password", || async move {
        ctx.forgot_password.lock().await.reset(otp, new_password).await
    })
    .await
}

/// Log out, forget the profile and return to sign-in.
///
/// Local state is cleared even when the backend call fails.
pub async fn sign_out(ctx: &AppContext) -> DomainResult<()> {
    execute_command("auth::sign_out", || async move {
        if let Err(err) = ctx.auth.logout().await {
            debug!(error = %err, "logout request failed");
        }
        ctx.store.clear_profile();
        ctx.navigator.navigate(ROUTE_SIGNIN);
        Ok(())
    })
    .await
}
