pub mod company_selector;
pub mod error_text;
pub mod line_item;
pub mod upload_image;
