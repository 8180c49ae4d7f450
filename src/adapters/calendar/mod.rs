//! Calendar adapters: live HTTP gateway and the in-memory fallback store.
//! Both implement CalendarApiPort so the service can swap tiers per request.

pub mod http_api;
pub mod local_store;

pub use http_api::HttpCalendarAdapter;
pub use local_store::LocalCalendarStore;
