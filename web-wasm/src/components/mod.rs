pub mod celebration;
pub mod header;
pub mod result_card;
pub mod search_form;
