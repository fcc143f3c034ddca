use anyhow::Result;

use crate::model::StoredSession;

use super::LocalStore;

impl LocalStore {
    pub fn session(&self) -> Result<Option<StoredSession>> {
        Ok(self.read_state()?.session)
    }

    pub fn set_session(&self, session: Option<&StoredSession>) -> Result<()> {
        self.update_state(|st| st.session = session.cloned())
    }

    pub fn pkce_verifier(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.pkce_verifier)
    }

    pub fn set_pkce_verifier(&self, verifier: Option<&str>) -> Result<()> {
        self.update_state(|st| st.pkce_verifier = verifier.map(str::to_string))
    }
}
