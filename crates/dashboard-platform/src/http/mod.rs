pub mod fetch;

pub use fetch::{decode_body, FetchTransport};
