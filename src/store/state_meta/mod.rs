use std::fs;

use anyhow::{Context, Result};

use crate::model::ClientState;

use super::{LocalStore, write_atomic};

mod preferences;
mod session_tokens;

impl LocalStore {
    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ClientState::default());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported client state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    fn update_state(&self, f: impl FnOnce(&mut ClientState)) -> Result<()> {
        let mut st = self.read_state()?;
        f(&mut st);
        self.write_state(&st)
    }
}
