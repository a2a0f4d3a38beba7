pub mod error_box;
pub mod filter_panel;
pub mod page_header;
pub mod pagination_controls;
pub mod sortable_header_cell;
pub mod stat_card;
pub mod status_badge;
