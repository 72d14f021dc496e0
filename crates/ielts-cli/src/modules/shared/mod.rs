mod format_table;
mod view;

pub(crate) use format_table::print_table;
pub(crate) use view::{open_view, View};
