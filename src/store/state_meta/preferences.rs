use anyhow::Result;

use crate::model::Preferences;

use super::LocalStore;

impl LocalStore {
    pub fn preferences(&self) -> Result<Preferences> {
        Ok(self.read_state()?.preferences)
    }

    pub fn set_preferences(&self, prefs: Preferences) -> Result<()> {
        self.update_state(|st| st.preferences = prefs)
    }
}
