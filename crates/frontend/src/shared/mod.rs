pub mod api_utils;
pub mod cart_context;
pub mod components;
pub mod date_utils;
pub mod debounce;
pub mod export;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod number_format;
pub mod paged_list;
pub mod picker_aggregate;
pub mod poller;
pub mod request_gate;
pub mod storage;
