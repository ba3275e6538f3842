mod dropdown;

pub use dropdown::render_dropdown;
