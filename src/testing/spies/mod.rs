mod api_spy;

pub use api_spy::{ApiCall, ApiSpy};
