pub mod client;
pub mod payload;
pub mod relay;

pub use client::{HttpTransport, SubmitError, Transport};
pub use payload::{ErrorBody, SubmitRequest, SubmitResponse};
pub use relay::{LeadRelay, RelayReceipt};
