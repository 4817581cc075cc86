use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::schema::SendEmailResponse;
use crate::{
    app::{error::AppResult, AppState},
    domain::ContactForm,
};

/// An unreadable body is handled like an empty form, so it fails validation.
#[tracing::instrument(name = "handling contact form submission", skip(state, body))]
pub async fn send_email(
    State(state): State<AppState>,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> AppResult<Json<SendEmailResponse>> {
    let form = match body {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::warn!(detail = %rejection.body_text(), "failed to parse contact form body");
            ContactForm::default()
        }
    };

    state.dispatcher.submit_contact(form).await?;

    Ok(Json(SendEmailResponse::sent()))
}
