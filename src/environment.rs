/// Source of the host's identification string (the browser user agent).
pub trait EnvironmentProbe {
    fn identification(&self) -> Option<String>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowserInfo(String);

impl BrowserInfo {
    pub fn probe(probe: &dyn EnvironmentProbe) -> Self {
        let value = probe.identification().unwrap_or_default();
        tracing::debug!(user_agent = %value, "environment: probed");
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
