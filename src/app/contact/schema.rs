use serde::Serialize;

#[derive(Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SendEmailResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully!",
        }
    }
}
