use maillist_store::Store;

/// Entry point for every mailing list operation.
///
/// Holds the injected store; there is no other state. Operations are split
/// across modules by entity but all live on this type.
#[derive(Debug, Default)]
pub struct MailingList<S> {
    pub(crate) store: S,
}

impl<S: Store> MailingList<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
