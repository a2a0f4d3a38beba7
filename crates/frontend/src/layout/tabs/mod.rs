//! Tab workspace: key → page registry, titles and the page wrapper.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, entity_element_name, restored_tab_title, tab_label_for_key};
