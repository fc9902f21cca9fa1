pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod record;
pub mod source;
pub mod ticker;
