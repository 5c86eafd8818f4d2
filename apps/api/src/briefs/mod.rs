// Brief Store: file-per-record CRUD over product briefs, plus its HTTP handlers.

pub mod handlers;
pub mod store;
