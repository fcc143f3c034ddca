use crate::model::Provider;

mod auth_flow;

/// Collected answers of a login, sign-up or OAuth flow in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum AuthWizard {
    Login {
        email: Option<String>,
    },
    Signup {
        name: Option<String>,
        email: Option<String>,
    },
    Oauth {
        provider: Provider,
    },
}
