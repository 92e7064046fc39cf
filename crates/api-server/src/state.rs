use std::sync::Arc;

use application::StoreApp;

/// Shared handler state. The whole application is behind one `Arc`, so
/// cloning per request is a pointer copy.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<StoreApp>,
}
