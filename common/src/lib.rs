//! Order Form Common Library
//!
//! CLIとWeb(WASM)で共有される注文入力フォームの状態機械と型

pub mod types;
pub mod error;
pub mod grid;
pub mod focus;
pub mod summary;
pub mod images;
pub mod line_item;
pub mod field_array;
pub mod company;
pub mod validation;
pub mod controller;

pub use types::{ImageAsset, ItemId, LineItemValues, OrderStatus, OrderValues};
pub use error::{Error, Result};
pub use grid::{CellCoord, CellSurface, Column, KeyAction, NavKey};
pub use focus::{FocusRequest, FocusScheduler};
pub use summary::{SummarySnapshot, ViewState};
pub use images::{DecodeTicket, ImageStore, MediaSource, ModalClick, ScrollDirection};
pub use line_item::LineItem;
pub use field_array::{FieldArray, RowTarget};
pub use company::{Company, CompanySelector};
pub use validation::{FieldError, OrderSchema, Schema, ValidationErrors};
pub use controller::{Confirm, KeyOutcome, OrderForm, SubmitOutcome, Submitter};
