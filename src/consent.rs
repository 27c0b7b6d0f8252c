use crate::error::Result;

pub const CONSENT_COOKIE_NAME: &str = "userConsent";
pub const CONSENT_COOKIE_VALUE: &str = "true";

/// Durable record of the user's consent.
pub trait ConsentStore {
    fn has_consent(&self) -> bool;
    fn record_consent(&self) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentFlow {
    Pending,
    Accepted,
    Declined,
}

impl ConsentFlow {
    pub fn initial(store: &dyn ConsentStore, remember_consent: bool) -> Self {
        if remember_consent && store.has_consent() {
            tracing::debug!("consent: restored from cookie");
            return ConsentFlow::Accepted;
        }
        ConsentFlow::Pending
    }

    pub fn popup_visible(self) -> bool {
        self == ConsentFlow::Pending
    }

    pub fn consent_given(self) -> bool {
        self == ConsentFlow::Accepted
    }

    /// Returns true when this call moved the flow out of `Pending`.
    pub fn accept(&mut self) -> bool {
        if *self != ConsentFlow::Pending {
            return false;
        }
        *self = ConsentFlow::Accepted;
        true
    }

    pub fn decline(&mut self) -> bool {
        if *self != ConsentFlow::Pending {
            return false;
        }
        *self = ConsentFlow::Declined;
        true
    }
}

pub fn consent_cookie() -> String {
    format!("{CONSENT_COOKIE_NAME}={CONSENT_COOKIE_VALUE}; path=/")
}

/// Looks up a cookie in a `document.cookie` style string.
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

pub fn cookie_grants_consent(cookies: &str) -> bool {
    find_cookie(cookies, CONSENT_COOKIE_NAME) == Some(CONSENT_COOKIE_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakeConsentStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_pending_without_cookie() {
        let store = FakeConsentStore::default();
        let flow = ConsentFlow::initial(&store, true);
        assert_eq!(flow, ConsentFlow::Pending);
        assert!(flow.popup_visible());
        assert!(!flow.consent_given());
    }

    #[test]
    fn prior_cookie_skips_popup_only_when_remembered() {
        let store = FakeConsentStore::granted();
        assert_eq!(ConsentFlow::initial(&store, true), ConsentFlow::Accepted);
        assert_eq!(ConsentFlow::initial(&store, false), ConsentFlow::Pending);
    }

    #[test]
    fn terminal_states_do_not_move() {
        let mut flow = ConsentFlow::Pending;
        assert!(flow.decline());
        assert!(!flow.accept());
        assert_eq!(flow, ConsentFlow::Declined);
        assert!(!flow.popup_visible());

        let mut flow = ConsentFlow::Pending;
        assert!(flow.accept());
        assert!(!flow.decline());
        assert_eq!(flow, ConsentFlow::Accepted);
    }

    #[test]
    fn parses_cookie_header() {
        let cookies = "theme=dark; userConsent=true; _ga=GA1.2";
        assert_eq!(find_cookie(cookies, "theme"), Some("dark"));
        assert!(cookie_grants_consent(cookies));
        assert!(!cookie_grants_consent("userConsent=false"));
        assert!(!cookie_grants_consent(""));
    }

    #[test]
    fn consent_cookie_is_path_wide_without_expiry() {
        assert_eq!(consent_cookie(), "userConsent=true; path=/");
    }
}
