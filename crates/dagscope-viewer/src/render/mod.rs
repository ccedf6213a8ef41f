pub mod buffers;
pub mod camera;
pub mod draw;
pub mod picking;

pub use camera::{on_resize, setup_scene};
pub use draw::{draw_scene, spawn_instance_slots};
pub use picking::pick_on_click;
