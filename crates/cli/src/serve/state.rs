use resmock_provider::Provider;

/// Server state shared across request handlers.
///
/// The provider's schema registry is read-only after construction, so
/// concurrent requests borrow it without further synchronization.
pub(crate) struct AppState {
    pub(crate) provider: Provider,
}
