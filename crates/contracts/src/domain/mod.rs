//! Domain types and pure business logic shared by every consumer.

pub mod cart;
pub mod catalog;
pub mod member;
pub mod order;
pub mod period;
pub mod report;
pub mod window;

// Re-exports
pub use cart::{Cart, CartError, CartLine};
pub use catalog::CatalogItem;
pub use member::{Member, MemberDto};
pub use order::{MemberOrderRow, OrderDraft, OrderItemPayload, OrderPayload};
pub use period::PeriodCode;
pub use report::{GroupDefinition, GroupReport, ItemTotals, OrderLineRecord};
pub use window::{OrderWindow, WindowDraft, WindowState};
