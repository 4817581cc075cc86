use std::{io, sync::Arc};

use anyhow::Context;
use axum::{http::Request, middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::{Environment, Settings},
    dispatcher::ContactDispatcher,
    email::{MailTransport, SmtpMailer},
};

mod contact;
mod cors;
mod error;
mod health;

pub use self::cors::origin_allowed;

#[derive(Clone)]
pub struct AppState {
    dispatcher: ContactDispatcher,
}

fn app_router() -> Router<AppState> {
    health::router().merge(contact::router())
}

pub struct App {
    listener: TcpListener,
    dispatcher: ContactDispatcher,
    environment: Environment,
}

impl App {
    /// Builds the application with the SMTP relay described by `config`.
    pub async fn with(config: Settings) -> anyhow::Result<Self> {
        let email_client = &config.email_client;
        let mailer = SmtpMailer::new(
            &email_client.smtp_host,
            email_client.username.clone(),
            email_client.password.clone(),
        )
        .context("The SMTP transport should be configurable.")?;

        Self::with_transport(config, Arc::new(mailer)).await
    }

    pub async fn with_transport(
        config: Settings,
        transport: Arc<dyn MailTransport>,
    ) -> anyhow::Result<Self> {
        let dispatcher = ContactDispatcher::new(
            transport,
            config.email_client.username.clone(),
            config.email_client.admin_recipient().to_owned(),
        );

        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .context("The listener should be able to bind the address.")?;

        Ok(Self {
            listener,
            dispatcher,
            environment: config.application.environment,
        })
    }

    pub fn port(&self) -> io::Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }

    pub async fn serve(self) -> Result<(), io::Error> {
        let app = app_router()
            .with_state(AppState {
                dispatcher: self.dispatcher,
            })
            .layer(cors::cors_layer())
            .layer(middleware::from_fn_with_state(
                self.environment,
                cors::guard_origin,
            ))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        %id,
                    )
                }),
            );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
