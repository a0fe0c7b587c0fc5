//! Error Catcher
//!
//! Renders every error response, whether raised by a handler or by the router itself,
//! as an [`ErrorEnvelope`].

use salvo::{http::ResBody, prelude::*};

use crate::envelope::{ErrorEnvelope, ValidationErrors};

#[derive(Debug, Clone, Copy)]
pub(crate) struct EnvelopeCatcher {
    expose_detail: bool,
}

impl EnvelopeCatcher {
    #[must_use]
    pub(crate) fn new(expose_detail: bool) -> Self {
        Self { expose_detail }
    }

    fn envelope(self, error: &StatusError) -> ErrorEnvelope {
        let errors = error
            .cause
            .as_deref()
            .and_then(|cause| cause.downcast_ref::<ValidationErrors>())
            .map(|validation| validation.0.clone());

        let debug = if self.expose_detail {
            error
                .detail
                .clone()
                .or_else(|| error.cause.as_ref().map(ToString::to_string))
        } else {
            None
        };

        ErrorEnvelope {
            success: false,
            message: error.brief.clone(),
            errors,
            debug,
        }
    }
}

#[handler]
impl EnvelopeCatcher {
    async fn handle(&self, res: &mut Response, ctrl: &mut FlowCtrl) {
        let status = res
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let envelope = match res.take_body() {
            ResBody::Error(error) => self.envelope(&error),
            _ => ErrorEnvelope {
                success: false,
                message: status
                    .canonical_reason()
                    .unwrap_or("Something went wrong")
                    .to_string(),
                errors: None,
                debug: None,
            },
        };

        res.status_code(status);
        res.render(Json(envelope));

        ctrl.skip_rest();
    }
}
