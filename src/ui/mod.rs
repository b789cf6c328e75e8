pub mod change_detail;
pub mod diff_view;
pub mod font;
pub mod history;
pub mod monitor_form;
pub mod monitor_list;
pub mod viewport;
