use tracing::{debug, info};

use maillist_model::SystemHeader;
use maillist_store::Store;

use crate::error::Result;
use crate::service::MailingList;

impl<S: Store> MailingList<S> {
    /// Stores `headers` as the catalog unless one already exists.
    ///
    /// Returns true if the catalog was written.
    pub fn seed_catalog(&mut self, headers: Vec<SystemHeader>) -> Result<bool> {
        if !self.store.catalog()?.is_empty() {
            debug!("catalog already seeded");
            return Ok(false);
        }
        let count = headers.len();
        self.store.insert_catalog(headers)?;
        info!(fields = count, "seeded field catalog");
        Ok(true)
    }

    /// Catalog ordered by name.
    ///
    /// This is the order shown to users and the order auto-mapping walks, so
    /// the first field by name wins when a header matches several.
    pub fn system_headers(&self) -> Result<Vec<SystemHeader>> {
        let mut headers = self.store.catalog()?;
        headers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(headers)
    }
}
